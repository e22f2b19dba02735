use clap::{Parser, Subcommand};
use shopcore::shop::Price;

#[derive(Parser)]
#[command(name = "shopbot")]
#[command(author, version, about = "Telegram gift card shop with crypto payment quotes", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the bot (default)
    Run {
        /// Receive updates through a webhook (WEBHOOK_URL) instead of long polling
        #[arg(long)]
        webhook: bool,
    },

    /// Print a live quote for a USD amount, as the bot would show it
    Quote {
        /// Payment asset symbol, e.g. BTC
        symbol: String,

        /// Amount in USD, e.g. 35 or $35
        usd: Price,
    },
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
