//! CLI logic for the plotgraph story graph tool.
//!
//! Reads the XML story named on the command line, builds its graph and
//! writes the requested outputs.

pub mod error_adapter;

mod args;
mod config;

pub use args::Args;

use std::{fs, path::Path};

use log::{info, warn};

use plotgraph::{
    GraphBuilder, PlotgraphError,
    config::DisplayMode,
    export::{Exporter, dot::Dot, html::Html},
    semantic::StoryGraph,
};

/// Run the plotgraph CLI application
///
/// Builds the graph of the input story and writes the HTML and DOT outputs
/// that were requested. With no output requested the graph is only built and
/// summarized in the log.
///
/// # Arguments
///
/// * `args` - Command-line arguments
///
/// # Errors
///
/// Returns `PlotgraphError` for:
/// - A missing input file, before anything is written
/// - File I/O errors
/// - Configuration loading errors
/// - Malformed XML
/// - Rendering errors
pub fn run(args: &Args) -> Result<(), PlotgraphError> {
    info!(
        input_path = args.xml,
        html_path:? = args.out,
        dot_path:? = args.out_dot;
        "Processing story"
    );

    let input = Path::new(&args.xml);
    if !input.exists() {
        return Err(PlotgraphError::InputNotFound(input.to_path_buf()));
    }

    let mut app_config = config::load_config(args.config.as_ref())?;
    if args.use_label {
        app_config = app_config.with_display(DisplayMode::Label);
    }

    let source = fs::read_to_string(input)?;

    let builder = GraphBuilder::new(app_config);
    let document = builder.parse(&source)?;
    let graph = builder.build(&document)?;

    let render = builder.config().render();
    let mut outputs: Vec<(&str, Box<dyn Exporter>)> = Vec::new();
    if let Some(path) = &args.out {
        outputs.push((path.as_str(), Box::new(Html::new(render))));
    }
    if let Some(path) = &args.out_dot {
        outputs.push((path.as_str(), Box::new(Dot::new(render))));
    }

    if outputs.is_empty() {
        summarize(&graph);
        return Ok(());
    }

    // Render everything before writing so a failure leaves no partial output.
    let rendered = outputs
        .into_iter()
        .map(|(path, exporter)| -> Result<_, PlotgraphError> {
            let text = exporter.export_graph(&graph)?;
            Ok((path, exporter.format_name(), text))
        })
        .collect::<Result<Vec<_>, PlotgraphError>>()?;

    for (path, format, text) in rendered {
        fs::write(path, text)?;
        info!("Wrote {format} to {path}");
    }

    Ok(())
}

/// Process exit status for an error returned by [`run`].
///
/// A missing input file is reported but still ends the run cleanly.
pub fn exit_code(err: &PlotgraphError) -> i32 {
    match err {
        PlotgraphError::InputNotFound(_) => 0,
        _ => 1,
    }
}

/// Logs the size of the graph when no output file was requested.
fn summarize(graph: &StoryGraph) {
    warn!("No output requested, use --out or --out-dot to write the graph");
    info!(
        nodes = graph.nodes().len(),
        edges = graph.edges().len(),
        dangling = graph.dangling_edges().count(),
        synthesized = graph.is_synthesized();
        "Graph summary"
    );
}
