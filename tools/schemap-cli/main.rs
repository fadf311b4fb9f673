use clap::Parser;
use schemap::prelude::*;
use serde::Deserialize;
use std::fs;
use std::time::Instant;

// --- JSON Deserialization Structs (Registry Format Specific) ---
// These structs match the socket files exported by the socket registry and
// are only used here for conversion.

#[derive(Deserialize)]
struct RawSocket {
    #[serde(alias = "socketId")]
    id: String,
    #[serde(default)]
    name: Option<String>,
    #[serde(default, alias = "structure")]
    schema: Option<serde_json::Value>,
}

impl IntoSocketSchema for RawSocket {
    fn into_socket_schema(self) -> std::result::Result<SocketSchema, SchemaConversionError> {
        let label = self.name.unwrap_or_else(|| self.id.clone());
        let schema = self
            .schema
            .ok_or_else(|| SchemaConversionError::MissingSchema(label.clone()))?;
        if !schema.is_object() {
            return Err(SchemaConversionError::ValidationError(format!(
                "schema of '{}' must be a JSON object",
                label
            )));
        }
        Ok(SocketSchema::new(self.id, schema))
    }
}

/// Builds and validates a field mapping between two node sockets
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to the input (consumer) socket JSON file
    input_socket: String,
    /// Path to the output (producer) socket JSON file
    output_socket: String,

    /// Existing mapping JSON to restore before editing
    #[arg(short, long)]
    mapping: Option<String>,

    /// Connect every compatible, same-named property pair
    #[arg(short, long)]
    connect_all: bool,

    /// Static literal for an input property, as PATH=JSON (repeatable)
    #[arg(short = 's', long = "static", value_name = "PATH=JSON")]
    static_values: Vec<String>,

    /// Id of the wildcard socket
    #[arg(long, default_value = ANY_DATA_SOCKET_ID)]
    any_data: String,

    /// Print both property trees with their connections
    #[arg(short, long)]
    tree: bool,

    /// Write the mapping to this file instead of stdout
    #[arg(short, long)]
    out: Option<String>,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    let cli = Cli::parse();
    run(cli);
}

fn run(cli: Cli) {
    let total_start = Instant::now();

    // --- 1. Loading ---
    let input = load_socket(&cli.input_socket);
    let output = load_socket(&cli.output_socket);
    let existing = cli.mapping.as_deref().map(|path| {
        MappingSpecification::from_file(path).unwrap_or_else(|e| {
            exit_with_error(&format!("Failed to load mapping from '{}': {}", path, e))
        })
    });

    // --- 2. Session ---
    let mut session = MappingSession::builder()
        .with_any_data_socket(&cli.any_data)
        .build();
    session.open(input, output, existing.as_ref());
    log::info!(
        "Opened session: {} input, {} output top-level properties",
        session.input_properties().len(),
        session.output_properties().len()
    );

    if cli.connect_all {
        let created = session.connect_all();
        log::info!("Connected {} properties", created.len());
    }

    for assignment in &cli.static_values {
        let (path, value) = parse_assignment(assignment);
        session
            .set_static_value(path, value)
            .unwrap_or_else(|e| exit_with_error(&e.to_string()));
    }

    if cli.tree {
        println!("{}", session.format_tree());
    }

    // --- 3. Serialization ---
    let spec = match session.create_mapping() {
        Ok(spec) => spec,
        Err(MappingError::InvalidMapping { issues }) => {
            eprintln!("\nMapping is invalid:");
            for issue in &issues {
                eprintln!("  - {}", issue);
            }
            std::process::exit(1);
        }
        Err(e) => exit_with_error(&e.to_string()),
    };

    match cli.out {
        Some(path) => {
            spec.save(&path)
                .unwrap_or_else(|e| exit_with_error(&e.to_string()));
            log::info!("Mapping written to '{}'", path);
        }
        None => {
            let json = spec
                .to_json()
                .unwrap_or_else(|e| exit_with_error(&e.to_string()));
            println!("{}", json);
        }
    }

    log::info!(
        "{} mapped, {} custom, {} static fields in {:?}",
        spec.mapping.len(),
        spec.custom_fields.len(),
        spec.static_fields.len(),
        total_start.elapsed()
    );
}

fn load_socket(path: &str) -> SocketSchema {
    let json = fs::read_to_string(path).unwrap_or_else(|e| {
        exit_with_error(&format!("Failed to read socket file '{}': {}", path, e))
    });
    let raw: RawSocket = serde_json::from_str(&json).unwrap_or_else(|e| {
        exit_with_error(&format!("Failed to parse socket JSON '{}': {}", path, e))
    });
    raw.into_socket_schema()
        .unwrap_or_else(|e| exit_with_error(&format!("Invalid socket '{}': {}", path, e)))
}

/// Splits `PATH=JSON`. A value that is not valid JSON is taken as a plain string.
fn parse_assignment(assignment: &str) -> (&str, serde_json::Value) {
    let Some((path, raw)) = assignment.split_once('=') else {
        exit_with_error(&format!("Expected PATH=JSON, got '{}'", assignment));
    };
    let value = serde_json::from_str(raw)
        .unwrap_or_else(|_| serde_json::Value::String(raw.to_string()));
    (path, value)
}

fn exit_with_error(message: &str) -> ! {
    eprintln!("\nError: {}", message);
    std::process::exit(1);
}
