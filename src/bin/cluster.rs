use csv::ReaderBuilder;
use nalgebra::DVector;
use rusty_kmeans::metrics::distance::Euclidean;
use rusty_kmeans::unsupervised::convergence::AssignmentsUnchanged;
use rusty_kmeans::unsupervised::kmeans::KMeans;
use rusty_kmeans::unsupervised::params::KMeansParams;
use std::error::Error;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

const USAGE: &str =
    "Usage: kmeans-csv <file.csv> <k> [--header] [--seed N] [--max-iterations N] [--debug]";

struct Args {
    file_path: String,
    k: usize,
    header: bool,
    seed: Option<u64>,
    max_iterations: Option<usize>,
    debug: bool,
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<Args, Box<dyn Error>> {
    let file_path = args.next().ok_or(USAGE)?;
    let k = args.next().ok_or(USAGE)?.parse::<usize>()?;
    let mut parsed = Args {
        file_path,
        k,
        header: false,
        seed: None,
        max_iterations: None,
        debug: false,
    };

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--header" => parsed.header = true,
            "--debug" => parsed.debug = true,
            "--seed" => parsed.seed = Some(args.next().ok_or(USAGE)?.parse()?),
            "--max-iterations" => {
                parsed.max_iterations = Some(args.next().ok_or(USAGE)?.parse()?)
            }
            other => return Err(format!("Unknown argument '{}'. {}", other, USAGE).into()),
        }
    }
    Ok(parsed)
}

fn read_observations(file_path: &str, header: bool) -> Result<Vec<DVector<f64>>, Box<dyn Error>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(header)
        .from_path(file_path)?;
    let mut observations = Vec::new();

    for result in reader.records() {
        let record = result?;
        let mut row = Vec::with_capacity(record.len());
        for value in record.iter() {
            row.push(value.trim().parse::<f64>()?);
        }
        observations.push(DVector::from_vec(row));
    }
    Ok(observations)
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = parse_args(std::env::args().skip(1))?;

    let subscriber = FmtSubscriber::builder()
        .with_max_level(if args.debug { Level::DEBUG } else { Level::INFO })
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let observations = read_observations(&args.file_path, args.header)?;
    info!(
        observations = observations.len(),
        file = %args.file_path,
        "loaded observations"
    );

    let mut params = KMeansParams::new();
    params.set_seed(args.seed);
    params.set_debug(args.debug);
    if let Some(max_iterations) = args.max_iterations {
        params.set_max_iterations(max_iterations);
    }

    let kmeans = KMeans::with_params(Euclidean, AssignmentsUnchanged, params);
    let result = kmeans.cluster(&observations, args.k)?;
    let model = result.model();

    println!(
        "{:?} after {} iterations in {:.3} ms",
        result.termination(),
        result.iterations(),
        result.duration_ms()
    );
    println!("Inertia: {}", model.inertia()?);
    for (i, (centroid, size)) in model
        .centroids()
        .iter()
        .zip(model.cluster_sizes())
        .enumerate()
    {
        let coordinates = centroid
            .iter()
            .map(|v| format!("{:.4}", v))
            .collect::<Vec<_>>()
            .join(", ");
        println!("Cluster {}: {} observations, centroid [{}]", i, size, coordinates);
    }
    Ok(())
}
