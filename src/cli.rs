use std::path::PathBuf;

use clap::Parser;

/// Collects one mass-email submission from the command line.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Subject line for every email in the batch
    #[arg(short, long, help = "The subject line applied to every email")]
    pub subject: String,

    /// Message body shared by every email
    #[arg(short, long, help = "The message body shared by every email")]
    pub body: String,

    /// Recipient addresses typed directly
    #[arg(
        short,
        long,
        conflicts_with = "file",
        required_unless_present = "file",
        help = "Recipient addresses, separated by commas or newlines"
    )]
    pub emails: Option<String>,

    /// Recipient file (must end in .csv)
    #[arg(
        short,
        long,
        value_name = "PATH",
        help = "Path to a .csv file of recipient addresses"
    )]
    pub file: Option<PathBuf>,

    /// When to deliver (optional)
    #[arg(
        long,
        value_name = "DATETIME",
        help = "Local date/time to schedule delivery, e.g. 2031-05-20T08:00; omit to send immediately"
    )]
    pub schedule: Option<String>,
}
