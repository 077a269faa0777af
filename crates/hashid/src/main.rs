use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use hashid::client::{self, IdClient};
use hashid::config::{ClientConfig, ClientKind};
use hashid::error::IdError;
use hashid::id;
use hashid::output::{self, OutputMode};
use hashid::types::{IdFamily, IssuedId, MutationKey};

#[derive(Parser)]
#[command(name = "hid", about = "Stable identifiers derived from business keys")]
struct Cli {
    #[arg(long, default_value_t = false, global = true)]
    json: bool,

    /// Remember created analysis ids for the rest of this invocation
    #[arg(long, env = "HID_PERSIST", global = true)]
    persist: bool,

    #[arg(long, env = "HID_CLIENT", default_value = "hash", global = true)]
    client: ClientKind,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the raw digest of an ordered key tuple
    Derive {
        #[arg(required = true)]
        keys: Vec<String>,
    },
    Donor {
        submitted_id: String,
        project_id: String,
    },
    Specimen {
        submitted_id: String,
        project_id: String,
    },
    Sample {
        submitted_id: String,
        project_id: String,
    },
    File {
        submitted_id: String,
        project_id: String,
    },
    Mutation {
        chromosome: String,
        chromosome_start: String,
        chromosome_end: String,
        mutation: String,
        mutation_type: String,
        assembly_version: String,
    },
    Object {
        analysis_id: String,
        file_name: String,
    },
    /// Accept caller-chosen analysis ids and report whether each is observed
    Analysis {
        #[arg(required = true)]
        ids: Vec<String>,
    },
    /// Create random analysis ids, reserving them when persisting
    Random {
        #[arg(short = 'n', long, default_value_t = 1)]
        count: usize,
    },
    /// Generate random analysis ids not observed by this client
    Unique {
        #[arg(short = 'n', long, default_value_t = 1)]
        count: usize,
    },
}

fn fail(err: IdError, mode: OutputMode) -> ! {
    output::print_error(&err, mode);
    process::exit(1);
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("HID_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn repeat(
    count: usize,
    family: IdFamily,
    mut next: impl FnMut() -> Result<String, IdError>,
) -> Result<Vec<IssuedId>, IdError> {
    (0..count)
        .map(|_| next().map(|id| IssuedId::new(family, id)))
        .collect()
}

fn main() {
    init_tracing();
    let cli = Cli::parse();
    let mode = if cli.json {
        OutputMode::Json
    } else {
        OutputMode::Human
    };

    let config = ClientConfig {
        kind: cli.client,
        persist: cli.persist,
    };
    let client = match client::connect(&config) {
        Ok(c) => c,
        Err(e) => fail(e, mode),
    };

    let derived = |family: IdFamily, result: Result<String, IdError>| match result {
        Ok(id) => output::print_issued(&IssuedId::new(family, id), mode),
        Err(e) => fail(e, mode),
    };

    match cli.command {
        Commands::Derive { keys } => {
            let refs: Vec<&str> = keys.iter().map(String::as_str).collect();
            output::print_digest(&keys, &id::derive(&refs), mode);
        }

        Commands::Donor {
            submitted_id,
            project_id,
        } => derived(
            IdFamily::Donor,
            client.create_donor_id(&submitted_id, &project_id),
        ),

        Commands::Specimen {
            submitted_id,
            project_id,
        } => derived(
            IdFamily::Specimen,
            client.create_specimen_id(&submitted_id, &project_id),
        ),

        Commands::Sample {
            submitted_id,
            project_id,
        } => derived(
            IdFamily::Sample,
            client.create_sample_id(&submitted_id, &project_id),
        ),

        Commands::File {
            submitted_id,
            project_id,
        } => derived(
            IdFamily::File,
            client.create_file_id(&submitted_id, &project_id),
        ),

        Commands::Mutation {
            chromosome,
            chromosome_start,
            chromosome_end,
            mutation,
            mutation_type,
            assembly_version,
        } => {
            let key = MutationKey {
                chromosome,
                chromosome_start,
                chromosome_end,
                mutation,
                mutation_type,
                assembly_version,
            };
            derived(IdFamily::Mutation, client.create_mutation_id(&key));
        }

        Commands::Object {
            analysis_id,
            file_name,
        } => derived(
            IdFamily::Object,
            client.create_object_id(&analysis_id, &file_name),
        ),

        Commands::Analysis { ids } => {
            let mut accepted = Vec::with_capacity(ids.len());
            for submitted in &ids {
                match client.create_analysis_id(submitted) {
                    Ok(id) => accepted.push(IssuedId::new(IdFamily::Analysis, id)),
                    Err(e) => fail(e, mode),
                }
            }
            for issued in &accepted {
                match client.get_analysis_id(&issued.id) {
                    Ok(found) => output::print_analysis(issued, found.is_some(), mode),
                    Err(e) => fail(e, mode),
                }
            }
        }

        Commands::Random { count } => {
            match repeat(count, IdFamily::Analysis, || client.create_random_analysis_id()) {
                Ok(ids) => output::print_issued_list(&ids, mode),
                Err(e) => fail(e, mode),
            }
        }

        Commands::Unique { count } => {
            match repeat(count, IdFamily::Analysis, || {
                client.generate_unique_analysis_id()
            }) {
                Ok(ids) => output::print_issued_list(&ids, mode),
                Err(e) => fail(e, mode),
            }
        }
    }

    if let Err(e) = client.close() {
        fail(e, mode);
    }
}
