//! bia-explorer - Browse BioImage Archive studies and display image slices.
//!
//! This binary wires the library clients to a small set of subcommands.

use std::error::Error;
use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use bia_explorer::{
    config::{Cli, ClientConfig, Command, SliceArgs},
    display::{self, DisplayOptions},
    render::RenderHtml,
    ApiClient, Image, LazyArray, RepresentationFormat, SliceSpec, SubmissionClient,
};

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = cli.client_config();
    let result = match cli.command {
        Command::Study { accession, html } => run_study(&config, &accession, html),
        Command::Images { accession, format } => run_images(&config, &accession, format.as_deref()),
        Command::Files { accession } => run_files(&config, &accession),
        Command::Slice(args) => run_slice(&config, args),
        Command::Submission { accession, tsv } => run_submission(&config, &accession, tsv),
        Command::Collection { name } => run_collection(&config, &name),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

/// Initialize the tracing/logging subsystem.
fn init_logging(verbose: bool) {
    let env_filter = if verbose {
        "bia_explorer=debug"
    } else {
        "bia_explorer=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| env_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

// =============================================================================
// Study Commands
// =============================================================================

fn run_study(config: &ClientConfig, accession: &str, html: bool) -> Result<(), Box<dyn Error>> {
    let client = ApiClient::new(config.clone())?;

    let study = client
        .study_by_accession(accession)?
        .ok_or_else(|| format!("no study with accession '{accession}'"))?;

    if html {
        println!("{}", study.to_html());
        return Ok(());
    }

    println!("{}  {}", study.accession_id, study.title);
    println!("  organism:  {}", study.organism);
    println!("  released:  {}", study.release_date);
    if let Some(imaging_type) = &study.imaging_type {
        println!("  imaging:   {imaging_type}");
    }
    println!("  images:    {}", study.images_count);
    println!("  files:     {}", study.file_references_count);
    for (key, value) in &study.attributes {
        println!("  {key}: {value}");
    }

    Ok(())
}

fn run_images(
    config: &ClientConfig,
    accession: &str,
    format: Option<&str>,
) -> Result<(), Box<dyn Error>> {
    let client = ApiClient::new(config.clone())?;

    let study = client
        .study_by_accession(accession)?
        .ok_or_else(|| format!("no study with accession '{accession}'"))?;

    let format = format.map(|tag| RepresentationFormat::from(tag.to_string()));
    let mut count = 0usize;

    let print_image = |image: &Image| {
        let formats: Vec<&str> = image
            .representations
            .iter()
            .filter_map(|rep| rep.format.as_ref().map(RepresentationFormat::as_str))
            .collect();
        println!(
            "{}  {}  [{}]",
            image.uuid,
            image.dimensions.as_deref().unwrap_or("-"),
            formats.join(", ")
        );
    };

    match format {
        Some(format) => {
            for image in study.images_with_representation(&client, &format) {
                print_image(&image?);
                count += 1;
            }
        }
        None => {
            for image in study.images(&client) {
                print_image(&image?);
                count += 1;
            }
        }
    }

    info!("{count} image(s)");
    Ok(())
}

fn run_files(config: &ClientConfig, accession: &str) -> Result<(), Box<dyn Error>> {
    let client = ApiClient::new(config.clone())?;

    let study = client
        .study_by_accession(accession)?
        .ok_or_else(|| format!("no study with accession '{accession}'"))?;

    let mut total_size = 0u64;
    let mut count = 0usize;
    for fileref in study.file_references(&client) {
        let fileref = fileref?;
        println!("{}  {}", fileref.original_relpath.display(), fileref.size);
        total_size += fileref.size;
        count += 1;
    }

    info!("{count} file(s), {total_size} bytes");
    Ok(())
}

// =============================================================================
// Slice Command
// =============================================================================

fn run_slice(config: &ClientConfig, args: SliceArgs) -> Result<(), Box<dyn Error>> {
    let array = resolve_array(config, &args)?;

    info!(
        uri = array.uri(),
        shape = ?array.shape(),
        data_type = %array.data_type_name(),
        "opened array"
    );

    let spec = slice_spec(&args);
    let options = DisplayOptions {
        target_height: args.height,
        target_width: args.width,
        ..Default::default()
    };

    let raster = display::display_slice(&array, spec.as_ref(), &options)?;
    display::write_png(&raster, &args.output)?;

    let (width, height) = raster.dimensions();
    info!("wrote {}x{} raster to {}", width, height, args.output.display());
    Ok(())
}

/// Open the array the slice arguments point at: a direct URI, or the
/// looked-up representation of a study image.
fn resolve_array(config: &ClientConfig, args: &SliceArgs) -> Result<LazyArray, Box<dyn Error>> {
    if let Some(uri) = &args.uri {
        return Ok(LazyArray::open_ngff_uri(uri)?);
    }

    let accession = args
        .accession
        .as_deref()
        .ok_or("an accession or --uri is required")?;

    let client = ApiClient::new(config.clone())?;
    let study = client
        .study_by_accession(accession)?
        .ok_or_else(|| format!("no study with accession '{accession}'"))?;

    let image = match &args.image {
        Some(uuid) => client.get_image(uuid)?,
        None => study
            .images_with_representation(&client, &RepresentationFormat::OmeNgff)
            .next()
            .ok_or_else(|| format!("study '{accession}' has no OME-NGFF image"))??,
    };

    let representation = image
        .representations
        .iter()
        .find(|rep| rep.format == Some(RepresentationFormat::OmeNgff))
        .ok_or_else(|| format!("image '{}' has no OME-NGFF representation", image.uuid))?;

    Ok(LazyArray::open(representation)?)
}

/// Build the slice spec from the CLI coordinates, or `None` when no
/// coordinate was given so the default first plane applies.
fn slice_spec(args: &SliceArgs) -> Option<SliceSpec> {
    if args.channel.is_none() && args.z.is_none() && args.time.is_none() {
        return None;
    }
    Some(SliceSpec {
        c: args.channel.or(Some(0)),
        z: args.z.or(Some(0)),
        t: args.time.or(Some(0)),
        ..Default::default()
    })
}

// =============================================================================
// Submission Commands
// =============================================================================

fn run_submission(config: &ClientConfig, accession: &str, tsv: bool) -> Result<(), Box<dyn Error>> {
    let client = SubmissionClient::new(config)?;
    let submission = client.submission(accession)?;

    if tsv {
        print!("{}", submission.as_tsv());
    } else {
        println!("{}", serde_json::to_string_pretty(&submission)?);
    }

    Ok(())
}

fn run_collection(config: &ClientConfig, name: &str) -> Result<(), Box<dyn Error>> {
    let client = ApiClient::new(config.clone())?;

    let collection = client
        .collection_by_name(name)?
        .ok_or_else(|| format!("no collection named '{name}'"))?;

    println!("{}  {}", collection.name, collection.title);
    if !collection.subtitle.is_empty() {
        println!("  {}", collection.subtitle);
    }
    for study_uuid in &collection.study_uuids {
        println!("  {study_uuid}");
    }

    Ok(())
}
