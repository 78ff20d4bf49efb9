//! Available commands.

use clap::Subcommand;

#[derive(Subcommand)]
pub enum Commands {
    /// Show which assistant capabilities the backend can serve
    Status {
        /// Also check translation into these languages (comma separated)
        #[arg(long = "to", value_delimiter = ',')]
        targets: Vec<String>,
    },

    /// Suggest listing fields from a pet photo
    Classify {
        /// Image file (png, jpg, webp, gif) or a data:image URL
        image: String,
        /// Print the raw analysis as JSON
        #[arg(long)]
        json: bool,
    },

    /// Rewrite a listing description (reads stdin when TEXT is omitted)
    Improve {
        text: Option<String>,
        /// Extra facts for the writer, e.g. "Name: Biscuit, Breed: Beagle"
        #[arg(short, long)]
        context: Option<String>,
    },

    /// Fix spelling and grammar (reads stdin when TEXT is omitted)
    Proofread { text: Option<String> },

    /// Translate listing text (reads stdin when TEXT is omitted)
    Translate {
        text: Option<String>,
        /// Target language, e.g. "es"
        #[arg(long)]
        to: String,
        /// Source language; defaults to the configured source language
        #[arg(long)]
        from: Option<String>,
    },
}
