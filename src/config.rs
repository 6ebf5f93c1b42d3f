//! Configuration and CLI types.
//!
//! The library side is [`ClientConfig`]: an explicitly constructed value
//! holding the remote base URLs and the search page size, passed by
//! reference to the clients that need it. There is no ambient global
//! client.
//!
//! The binary side is [`Cli`], a clap parser with one subcommand per
//! operation. All options can also be set via environment variables with
//! the `BIA_` prefix:
//!
//! - `BIA_API_BASE` - Integrator search API base URL
//! - `BIA_BIOSTUDIES_BASE` - Legacy BioStudies API base URL
//! - `BIA_PAGE_SIZE` - Search page size (default: 100)

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use url::Url;

// =============================================================================
// Default Values
// =============================================================================

/// Default base URL of the integrator search API.
pub const DEFAULT_API_BASE: &str = "https://45.88.81.209:8080";

/// Default base URL of the legacy BioStudies API.
pub const DEFAULT_BIOSTUDIES_BASE: &str = "https://www.ebi.ac.uk/biostudies";

/// Default number of records per search page.
pub const DEFAULT_PAGE_SIZE: usize = 100;

// =============================================================================
// Client Configuration
// =============================================================================

/// Configuration for the archive clients.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the integrator search API.
    pub api_base: Url,

    /// Base URL of the legacy BioStudies API.
    pub biostudies_base: Url,

    /// Number of records requested per search page.
    pub page_size: usize,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base: Url::parse(DEFAULT_API_BASE).expect("default API base URL is valid"),
            biostudies_base: Url::parse(DEFAULT_BIOSTUDIES_BASE)
                .expect("default BioStudies base URL is valid"),
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

// =============================================================================
// CLI Arguments
// =============================================================================

/// bia-explorer - Browse BioImage Archive studies and display image slices.
#[derive(Parser, Debug)]
#[command(name = "bia-explorer")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Base URL of the integrator search API.
    #[arg(long, env = "BIA_API_BASE", default_value = DEFAULT_API_BASE, global = true)]
    pub api_base: Url,

    /// Base URL of the legacy BioStudies API.
    #[arg(long, env = "BIA_BIOSTUDIES_BASE", default_value = DEFAULT_BIOSTUDIES_BASE, global = true)]
    pub biostudies_base: Url,

    /// Number of records requested per search page.
    #[arg(long, env = "BIA_PAGE_SIZE", default_value_t = DEFAULT_PAGE_SIZE, global = true)]
    pub page_size: usize,

    /// Enable debug logging.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Build the library-side configuration from the parsed arguments.
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            api_base: self.api_base.clone(),
            biostudies_base: self.biostudies_base.clone(),
            page_size: self.page_size,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Show a study looked up by accession id.
    Study {
        /// Study accession id, e.g. S-BIAD144.
        accession: String,

        /// Emit the HTML pretty-print instead of a text summary.
        #[arg(long)]
        html: bool,
    },

    /// List the images of a study.
    Images {
        /// Study accession id.
        accession: String,

        /// Only list images carrying a representation of this format tag.
        #[arg(long)]
        format: Option<String>,
    },

    /// List the file references of a study.
    Files {
        /// Study accession id.
        accession: String,
    },

    /// Materialize a 2-D slice of an OME-NGFF image and save it as PNG.
    Slice(SliceArgs),

    /// Fetch the legacy submission document for an accession.
    Submission {
        /// Study accession id.
        accession: String,

        /// Emit the TSV serialization instead of JSON.
        #[arg(long)]
        tsv: bool,
    },

    /// Look up a collection by its unique name.
    Collection {
        /// Collection name.
        name: String,
    },
}

/// Arguments for the `slice` subcommand.
#[derive(Args, Debug)]
pub struct SliceArgs {
    /// Study accession id; the first image with an OME-NGFF representation
    /// is used unless --image narrows the choice.
    #[arg(required_unless_present = "uri")]
    pub accession: Option<String>,

    /// Image uuid to slice.
    #[arg(long)]
    pub image: Option<String>,

    /// Slice an OME-NGFF store at this URI directly, without any lookup.
    #[arg(long, conflicts_with_all = ["accession", "image"])]
    pub uri: Option<String>,

    /// Channel coordinate.
    #[arg(short = 'c', long)]
    pub channel: Option<u64>,

    /// Z coordinate.
    #[arg(short = 'z', long)]
    pub z: Option<u64>,

    /// Time coordinate.
    #[arg(short = 't', long)]
    pub time: Option<u64>,

    /// Resize the raster to this height, keeping aspect ratio unless
    /// --width is also given.
    #[arg(long)]
    pub height: Option<u32>,

    /// Resize the raster to this width, keeping aspect ratio unless
    /// --height is also given.
    #[arg(long)]
    pub width: Option<u32>,

    /// Output PNG path.
    #[arg(short, long, default_value = "slice.png")]
    pub output: PathBuf,
}

// =============================================================================
// Tests
// =============================================================================
