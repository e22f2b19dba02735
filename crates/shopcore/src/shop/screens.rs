//! Text and buttons of every shop screen.
//!
//! Screens are rendered as Telegram HTML; anything that came from a token or
//! from settings is escaped before it is interpolated.

use super::catalog::{CatalogItem, Region};
use super::price::Price;
use super::quote::Quote;
use super::settings::ShopSettings;
use super::token::{NavToken, TokenError, ENTER_SHOP};
use super::PaymentAsset;

pub const BACK_LABEL: &str = "↩️ Back";
pub const ENTER_SHOP_LABEL: &str = "Enter shop 🛍️";
pub const QUOTE_UNAVAILABLE_TEXT: &str = "Unable to fetch cryptocurrency price.";

/// Regions per keyboard row.
const REGION_COLUMNS: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextFormat {
    Plain,
    Html,
}

/// An inline button: label plus the encoded token it sends back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Button {
    pub label: String,
    pub token: String,
}

impl Button {
    pub fn new(label: impl Into<String>, token: &NavToken) -> Result<Self, TokenError> {
        Ok(Self {
            label: label.into(),
            token: token.encode()?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Screen {
    pub text: String,
    pub format: TextFormat,
    /// Rows of buttons; empty for a terminal screen.
    pub keyboard: Vec<Vec<Button>>,
}

impl Screen {
    pub fn is_terminal(&self) -> bool {
        self.keyboard.is_empty()
    }

    /// All buttons, row by row.
    pub fn buttons(&self) -> impl Iterator<Item = &Button> {
        self.keyboard.iter().flatten()
    }
}

/// Escapes the three characters Telegram HTML treats specially.
pub fn escape_html(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            _ => result.push(c),
        }
    }
    result
}

pub fn welcome(settings: &ShopSettings) -> Screen {
    let text = format!(
        "💎 Welcome to {} 💎\n\n\
         The best ready-to-use gift cards on the market with a lot of happy customers and a reputable history!\n\n\
         For support, contact: {}\n\n\
         Enter our shop and choose a product you like 🔽",
        escape_html(&settings.shop_name),
        escape_html(&settings.support_contact),
    );

    Screen {
        text,
        format: TextFormat::Html,
        keyboard: vec![vec![Button {
            label: ENTER_SHOP_LABEL.to_string(),
            token: ENTER_SHOP.to_string(),
        }]],
    }
}

pub fn region_list(regions: &[Region]) -> Result<Screen, TokenError> {
    let mut keyboard = Vec::with_capacity(regions.len().div_ceil(REGION_COLUMNS));
    for row in regions.chunks(REGION_COLUMNS) {
        keyboard.push(
            row.iter()
                .map(|region| Button::new(region.label.clone(), &NavToken::Region(region.id.clone())))
                .collect::<Result<Vec<_>, _>>()?,
        );
    }

    Ok(Screen {
        text: "Select a country to view available items:".to_string(),
        format: TextFormat::Html,
        keyboard,
    })
}

pub fn item_list(region: &str, items: &[CatalogItem]) -> Result<Screen, TokenError> {
    let mut keyboard = Vec::with_capacity(items.len() + 1);
    for item in items {
        let token = NavToken::Confirm {
            region: region.to_string(),
            item: item.label.clone(),
            price: item.price,
        };
        keyboard.push(vec![Button::new(format!("{} - {}", item.label, item.price), &token)?]);
    }
    keyboard.push(vec![Button::new(BACK_LABEL, &NavToken::EnterShop)?]);

    Ok(Screen {
        text: format!("Items available in {}:\n\nSelect an item:", escape_html(region)),
        format: TextFormat::Html,
        keyboard,
    })
}

pub fn confirm(region: &str, item: &str, price: Price) -> Result<Screen, TokenError> {
    let pay = NavToken::Pay {
        region: region.to_string(),
        item: item.to_string(),
        price,
    };
    let back = NavToken::Region(region.to_string());

    Ok(Screen {
        text: format!("You selected {} - {}\nProceed to checkout?", escape_html(item), price),
        format: TextFormat::Html,
        keyboard: vec![
            vec![Button::new(format!("Pay {price}"), &pay)?],
            vec![Button::new(BACK_LABEL, &back)?],
        ],
    })
}

pub fn payment_method(region: &str, item: &str, price: Price, assets: &[PaymentAsset]) -> Result<Screen, TokenError> {
    let mut keyboard = Vec::with_capacity(assets.len() + 1);
    for asset in assets {
        let token = NavToken::PayWithCrypto {
            symbol: asset.symbol.clone(),
            item: item.to_string(),
            price,
        };
        keyboard.push(vec![Button::new(asset.name.clone(), &token)?]);
    }
    let back = NavToken::Confirm {
        region: region.to_string(),
        item: item.to_string(),
        price,
    };
    keyboard.push(vec![Button::new(BACK_LABEL, &back)?]);

    Ok(Screen {
        text: format!(
            "Payment for {} - {}\nChoose your payment method:",
            escape_html(item),
            price
        ),
        format: TextFormat::Html,
        keyboard,
    })
}

/// Final payment instructions; no buttons.
pub fn crypto_quote(item: &str, price: Price, quote: &Quote, asset: &PaymentAsset, footer: &str) -> Screen {
    let text = format!(
        "ITEM: {item}\n\
         PRICE: {price}\n\n\
         Please send: <code>{amount} {symbol}</code>\n\n\
         To the following address: \n\n\
         <code>{address}</code>\n\n\
         {footer}",
        item = escape_html(item),
        amount = quote.crypto_amount,
        symbol = escape_html(&asset.symbol),
        address = escape_html(&asset.payout_address),
        footer = escape_html(footer),
    );

    Screen {
        text,
        format: TextFormat::Html,
        keyboard: Vec::new(),
    }
}

pub fn quote_unavailable() -> Screen {
    Screen {
        text: QUOTE_UNAVAILABLE_TEXT.to_string(),
        format: TextFormat::Plain,
        keyboard: Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    fn price(s: &str) -> Price {
        s.parse().unwrap()
    }

    fn region(id: &str) -> Region {
        Region {
            id: id.to_string(),
            label: format!("flag {id}"),
        }
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("a < b & c > d"), "a &lt; b &amp; c &gt; d");
        assert_eq!(escape_html("Amazon ($100)"), "Amazon ($100)");
    }

    #[test]
    fn test_region_list_two_per_row() {
        let regions: Vec<Region> = ["USA", "Canada", "UK"].into_iter().map(region).collect();
        let screen = region_list(&regions).unwrap();

        assert_eq!(screen.keyboard.len(), 2);
        assert_eq!(screen.keyboard[0].len(), 2);
        assert_eq!(screen.keyboard[1].len(), 1);
        assert_eq!(screen.keyboard[0][1].token, "Canada");
        assert_eq!(screen.keyboard[1][0].label, "flag UK");
    }

    #[test]
    fn test_item_list_buttons_and_back() {
        let items = vec![CatalogItem::new("Steam ($100)", price("$30"))];
        let screen = item_list("Canada", &items).unwrap();

        assert_eq!(screen.text, "Items available in Canada:\n\nSelect an item:");
        assert_eq!(screen.keyboard[0][0].label, "Steam ($100) - $30");
        assert_eq!(screen.keyboard[0][0].token, "confirm_Canada_Steam ($100)_30");
        assert_eq!(screen.keyboard[1][0].label, BACK_LABEL);
        assert_eq!(screen.keyboard[1][0].token, "enter_shop");
    }

    #[test]
    fn test_confirm_screen() {
        let screen = confirm("USA", "Amazon ($100)", price("$35")).unwrap();
        assert_eq!(screen.text, "You selected Amazon ($100) - $35\nProceed to checkout?");
        assert_eq!(screen.keyboard[0][0].label, "Pay $35");
        assert_eq!(screen.keyboard[0][0].token, "pay_USA_Amazon ($100)_35");
        assert_eq!(screen.keyboard[1][0].token, "USA");
    }

    #[test]
    fn test_payment_method_screen() {
        let assets = vec![
            PaymentAsset::new("BTC", "Bitcoin", "bitcoin", "addr1"),
            PaymentAsset::new("ETH", "Ethereum", "ethereum", "addr2"),
        ];
        let screen = payment_method("USA", "Apple ($250)", price("$55"), &assets).unwrap();

        let labels: Vec<&str> = screen.buttons().map(|b| b.label.as_str()).collect();
        assert_eq!(labels, vec!["Bitcoin", "Ethereum", BACK_LABEL]);
        assert_eq!(screen.keyboard[1][0].token, "pay_with_crypto_ETH_Apple ($250)_55");
        assert_eq!(screen.keyboard[2][0].token, "confirm_USA_Apple ($250)_55");
    }

    #[test]
    fn test_crypto_quote_screen_is_terminal() {
        let asset = PaymentAsset::new("BTC", "Bitcoin", "bitcoin", "bc1qaddress");
        let quote = Quote::compute(dec!(35), dec!(50000)).unwrap();
        let screen = crypto_quote("Amazon ($100)", price("$35"), &quote, &asset, "Thanks <3");

        assert!(screen.is_terminal());
        assert!(screen.text.contains("ITEM: Amazon ($100)"));
        assert!(screen.text.contains("PRICE: $35"));
        assert!(screen.text.contains("<code>0.0007 BTC</code>"));
        assert!(screen.text.contains("<code>bc1qaddress</code>"));
        assert!(screen.text.ends_with("Thanks &lt;3"));
    }

    #[test]
    fn test_item_text_is_escaped() {
        let screen = confirm("USA", "<b>Gift</b>", price("$5")).unwrap();
        assert!(screen.text.contains("&lt;b&gt;Gift&lt;/b&gt;"));
    }
}
