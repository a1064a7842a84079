mod analysis;
mod query;
mod render;
mod report;
mod viewer;

use analysis::{CountHistogram, SourceSeries, DEFAULT_TOP_SOURCES};
use argh::FromArgs;
use bytesize::ByteSize;
use indicatif::{ProgressBar, ProgressStyle};
use query::{SourceRow, SparqlClient, CELL_SOURCES_QUERY, WIKIDATA_SPARQL_ENDPOINT};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Charts which bibliographic sources back cell class statements on Wikidata
#[derive(FromArgs, Debug)]
pub struct Args {
    /// directory the figure files are written to (default: current directory)
    #[argh(option, short = 'o', default = "PathBuf::from(\".\")")]
    output_dir: PathBuf,

    /// endpoint the SPARQL query is sent to (default: https://query.wikidata.org/sparql)
    #[argh(
        option,
        short = 'e',
        default = "WIKIDATA_SPARQL_ENDPOINT.to_string()"
    )]
    endpoint: String,

    /// render from a saved SPARQL JSON response instead of querying the endpoint
    #[argh(option, short = 'i')]
    input: Option<PathBuf>,

    /// save the raw SPARQL JSON response to this file
    #[argh(option, short = 's')]
    save_response: Option<PathBuf>,

    /// number of sources in the ranking (default: 10)
    #[argh(option, short = 'n', default = "DEFAULT_TOP_SOURCES")]
    top: usize,

    /// request timeout in seconds (default: wait indefinitely)
    #[argh(option)]
    timeout: Option<u64>,

    /// sort sources by descending count before ranking them
    #[argh(switch)]
    sort: bool,

    /// do not open the rendered figure in the default viewer
    #[argh(switch)]
    no_show: bool,
}

/// Errors that can end a run
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Query error: {0}")]
    Query(#[from] query::QueryError),

    #[error("Plot error: {0}")]
    Plot(#[from] render::PlotError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

type Result<T> = core::result::Result<T, AppError>;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let args: Args = argh::from_env();

    if let Err(e) = run(args).await {
        eprintln!("❌ Error: {}", e);
        std::process::exit(1);
    }
}

async fn run(args: Args) -> Result<()> {
    println!("🔬 Sources for cell classes on Wikidata");

    // Stage 1: Obtain the result rows
    let rows = match &args.input {
        Some(input) => {
            println!("📂 Loading saved response: {}", input.display());
            query::load_response(input)?
        }
        None => fetch_rows(&args).await?,
    };
    println!("✅ Received {} sources", rows.len());
    if let Some(leading) = describe_leading_source(&rows) {
        println!("   🏆 {}", leading);
    }

    // Stage 2: Reshape into aligned series
    println!("📊 Analyzing source counts...");
    let mut series = SourceSeries::from_rows(&rows);
    if args.sort {
        series = series.sorted_descending();
    } else if !series.is_descending() {
        println!("   ⚠️  Warning: Sources are not ordered by descending count; pass --sort to rank them");
    }

    let histogram = CountHistogram::from_counts(series.counts());
    if series.is_empty() {
        println!("   ⚠️  Warning: The endpoint returned no sources; the panels will be empty");
    } else {
        println!(
            "   ✅ {} sources share {} distinct cell class counts",
            series.len(),
            histogram.len()
        );
    }
    println!(
        "\n{}",
        report::format_top_sources_table(series.top(args.top), Some("Top Sources"))
    );
    println!(
        "\n{}\n",
        report::format_histogram_table(&histogram, Some("Cell Classes per Source"))
    );

    // Stage 3: Draw and save the figure
    println!("🎨 Rendering figure...");
    let written = render::render_figure(&series, args.top, &args.output_dir)?;
    for path in &written {
        println!("   💾 Saved {}", path.display());
    }

    // Stage 4: Show it
    if !args.no_show {
        show_figure(&render::OutputFormat::Png.output_path(&args.output_dir));
    }

    println!("\n🎉 Done!");
    Ok(())
}

/// Runs the fixed query against the configured endpoint.
async fn fetch_rows(args: &Args) -> Result<Vec<SourceRow>> {
    let client = SparqlClient::new(
        args.endpoint.as_str(),
        args.timeout.map(Duration::from_secs),
    )?;

    println!("🌐 Querying {}", client.endpoint());
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("   {spinner} {msg} [{elapsed}]") {
        spinner.set_style(style);
    }
    spinner.set_message("Waiting for the endpoint...");
    spinner.enable_steady_tick(Duration::from_millis(120));

    let body = client.run(CELL_SOURCES_QUERY).await;
    spinner.finish_and_clear();
    let body = body?;
    println!("✅ Downloaded {} of results", ByteSize(body.len() as u64));

    if let Some(path) = &args.save_response {
        save_response(&body, path)?;
        println!("💾 Saved response to {}", path.display());
    }

    Ok(query::parse_response(&body)?)
}

/// Summarises the most cited source along with one of the cell classes citing it.
///
/// Ties go to the earliest row, matching rank 1 of the ranking.
fn describe_leading_source(rows: &[SourceRow]) -> Option<String> {
    let leading = rows
        .iter()
        .reduce(|best, row| if row.count > best.count { row } else { best })?;
    let mut description = format!(
        "Most cited: {} <{}> with {} cell classes",
        leading.label, leading.reference, leading.count
    );

    if let (Some(label), Some(item)) = (&leading.sample_label, &leading.sample_item) {
        description.push_str(&format!(", e.g. {} <{}>", label, item));
    }

    Some(description)
}

fn save_response(body: &str, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, body)?;
    Ok(())
}

/// Opens the figure; a missing viewer only warrants a warning.
fn show_figure(path: &Path) {
    println!("🖼️  Opening {}", path.display());
    if let Err(e) = viewer::open_in_viewer(path) {
        println!("   ⚠️  Warning: Could not open viewer: {}", e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn parse(args: &[&str]) -> core::result::Result<Args, argh::EarlyExit> {
        Args::from_args(&["wikidata-cell-sources"], args)
    }

    #[test]
    fn defaults_match_a_plain_run() {
        let args = parse(&[]).unwrap();

        assert_eq!(args.output_dir, PathBuf::from("."));
        assert_eq!(args.endpoint, "https://query.wikidata.org/sparql");
        assert_eq!(args.top, 10);
        assert!(args.input.is_none());
        assert!(args.save_response.is_none());
        assert!(args.timeout.is_none());
        assert!(!args.sort);
        assert!(!args.no_show);
    }

    #[test]
    fn options_are_parsed() {
        let args = parse(&[
            "-o",
            "figures",
            "--top",
            "5",
            "--timeout",
            "60",
            "-i",
            "saved.json",
            "--sort",
            "--no-show",
        ])
        .unwrap();

        assert_eq!(args.output_dir, PathBuf::from("figures"));
        assert_eq!(args.top, 5);
        assert_eq!(args.timeout, Some(60));
        assert_eq!(args.input, Some(PathBuf::from("saved.json")));
        assert!(args.sort);
        assert!(args.no_show);
    }

    #[test]
    fn invalid_top_is_rejected() {
        assert!(parse(&["--top", "many"]).is_err());
    }

    #[test]
    fn leading_source_is_the_most_cited() {
        let rows = vec![
            SourceRow {
                reference: "http://www.wikidata.org/entity/Q28316534".to_string(),
                label: "Human Cell Atlas".to_string(),
                count: 17,
                sample_item: None,
                sample_label: None,
            },
            SourceRow {
                reference: "http://www.wikidata.org/entity/Q55118285".to_string(),
                label: "Cell Ontology".to_string(),
                count: 2345,
                sample_item: Some("http://www.wikidata.org/entity/Q101405".to_string()),
                sample_label: Some("neuron".to_string()),
            },
        ];

        let description = describe_leading_source(&rows).unwrap();
        assert_eq!(
            description,
            "Most cited: Cell Ontology <http://www.wikidata.org/entity/Q55118285> with 2345 cell classes, \
             e.g. neuron <http://www.wikidata.org/entity/Q101405>"
        );
        assert!(describe_leading_source(&[]).is_none());
    }

    #[test]
    fn leading_source_tie_goes_to_the_first_row() {
        let rows: Vec<SourceRow> = [("Cell Ontology", 5), ("PanglaoDB", 5), ("CellMarker", 3)]
            .into_iter()
            .map(|(label, count)| SourceRow {
                reference: format!("http://www.wikidata.org/entity/{label}"),
                label: label.to_string(),
                count,
                sample_item: None,
                sample_label: None,
            })
            .collect();

        let description = describe_leading_source(&rows).unwrap();
        assert!(description.starts_with("Most cited: Cell Ontology "));

        let series = SourceSeries::from_rows(&rows).sorted_descending();
        let (rank_one, _) = series.top(1).iter().next().unwrap();
        assert_eq!(rank_one, "Cell Ontology");
    }

    #[test]
    fn save_response_creates_parent_directories() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("responses").join("cells.json");

        save_response("{}", &path).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "{}");
    }

    #[test]
    fn query_errors_convert_into_app_errors() {
        let err: AppError = query::QueryError::MissingField {
            row: 0,
            field: "count",
        }
        .into();
        assert!(matches!(err, AppError::Query(_)));
        assert!(err.to_string().starts_with("Query error: "));
    }
}
