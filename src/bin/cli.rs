//! rowcodec CLI
//!
//! Encode, decode and build scan bounds for records from the command line.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use rowcodec::codec::prefix_successor;
use rowcodec::schema::{load_schema, parse_columns, save_schema};
use rowcodec::{CodecConfig, CodecError, Record, RecordDecoder, RecordEncoder, SharedSchema, Value};
use tracing_subscriber::{fmt, EnvFilter};

/// rowcodec CLI
#[derive(Parser, Debug)]
#[command(name = "rowcodec-cli")]
#[command(about = "Encode and decode rows with the rowcodec key/value format")]
#[command(version)]
struct Args {
    /// Column layout, e.g. "int32:key:notnull,string:key,bool"
    #[arg(short, long, required_unless_present = "schema_file")]
    columns: Option<String>,

    /// Schema file written by the `schema` subcommand
    #[arg(long, conflicts_with = "columns")]
    schema_file: Option<PathBuf>,

    /// Common id shared by all rows of the schema
    #[arg(long, default_value = "0", allow_hyphen_values = true)]
    common_id: i64,

    /// Schema version stored in every value
    #[arg(long, default_value = "0")]
    schema_version: i32,

    /// Key prefix byte (ASCII character)
    #[arg(short, long, default_value = "r")]
    prefix: char,

    /// Lay out value fields little-endian
    #[arg(long)]
    little_endian: bool,

    /// Text standing for an absent value
    #[arg(long, default_value = "\\N")]
    null_token: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Encode one record given one text value per column
    Encode {
        #[arg(allow_hyphen_values = true)]
        values: Vec<String>,
    },

    /// Decode a hex key and hex value
    Decode {
        key: String,
        value: String,

        /// Only materialize these column ordinals
        #[arg(long, value_delimiter = ',')]
        select: Vec<usize>,
    },

    /// Print scan bounds, optionally narrowed by leading key column values
    Bounds {
        #[arg(allow_hyphen_values = true)]
        key_values: Vec<String>,
    },

    /// Save the schema to a file
    Schema {
        path: PathBuf,
    },
}

fn main() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,rowcodec=debug"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    if let Err(e) = run(args) {
        tracing::error!("{}", e);
        std::process::exit(1);
    }
}

fn run(args: Args) -> rowcodec::Result<()> {
    let schema = load(&args)?;
    let prefix = prefix_byte(args.prefix)?;
    let config = CodecConfig::builder()
        .little_endian(args.little_endian)
        .build();

    match args.command {
        Commands::Encode { values } => {
            let record = parse_record(&schema, &values, &args.null_token)?;
            let encoder =
                RecordEncoder::with_config(args.schema_version, schema, args.common_id, &config)?;
            let (key, value) = encoder.encode(prefix, &record)?;
            println!("key:   {}", hex::encode(key));
            println!("value: {}", hex::encode(value));
        }
        Commands::Decode { key, value, select } => {
            let key = decode_hex(&key)?;
            let value = decode_hex(&value)?;
            let decoder =
                RecordDecoder::with_config(args.schema_version, schema.clone(), args.common_id, &config)?;

            let decoded = if select.is_empty() {
                decoder.decode(&key, &value)
            } else {
                decoder.decode_selection(&key, &value, &select)
            };
            let record = decoded.map_err(|e| {
                tracing::warn!("Failed to decode record: {}", e);
                e
            })?;

            for column in schema.iter() {
                match record.get(column.index) {
                    Some(v) => println!("{:>4} {:<10} {}", column.index, column.column_type, v),
                    None => println!("{:>4} {:<10} {}", column.index, column.column_type, args.null_token),
                }
            }
        }
        Commands::Bounds { key_values } => {
            let encoder =
                RecordEncoder::with_config(args.schema_version, schema, args.common_id, &config)?;
            // with key values, the range covers exactly the keys sharing that prefix
            let (start, end) = if key_values.is_empty() {
                (
                    encoder.encode_min_key_prefix(prefix),
                    encoder.encode_max_key_prefix(prefix)?,
                )
            } else {
                let start = encoder.encode_key_prefix_text(prefix, &key_values)?;
                let end = match prefix_successor(&start) {
                    Some(end) => end,
                    None => encoder.encode_max_key_prefix(prefix)?,
                };
                (start, end)
            };
            println!("start: {}", hex::encode(start));
            println!("end:   {}", hex::encode(end));
        }
        Commands::Schema { path } => {
            save_schema(&path, &schema)?;
            println!("saved {} columns to {}", schema.len(), path.display());
        }
    }

    Ok(())
}

fn load(args: &Args) -> rowcodec::Result<SharedSchema> {
    match (&args.columns, &args.schema_file) {
        (Some(columns), _) => parse_columns(columns),
        (None, Some(path)) => load_schema(path),
        (None, None) => Err(CodecError::InvalidSchema(
            "either --columns or --schema-file is required".to_string(),
        )),
    }
}

fn prefix_byte(prefix: char) -> rowcodec::Result<u8> {
    if prefix.is_ascii() {
        Ok(prefix as u8)
    } else {
        Err(CodecError::InvalidTextValue {
            column_type: "prefix".to_string(),
            text: prefix.to_string(),
            reason: "prefix must be a single ASCII character".to_string(),
        })
    }
}

fn decode_hex(text: &str) -> rowcodec::Result<Vec<u8>> {
    hex::decode(text).map_err(|e| CodecError::InvalidTextValue {
        column_type: "hex".to_string(),
        text: text.to_string(),
        reason: e.to_string(),
    })
}

fn parse_record(schema: &SharedSchema, values: &[String], null_token: &str) -> rowcodec::Result<Record> {
    if values.len() != schema.len() {
        return Err(CodecError::SchemaMismatch(format!(
            "{} values given for {} columns",
            values.len(),
            schema.len()
        )));
    }

    let mut record = Record::with_columns(schema.len());
    for column in schema.iter() {
        let text = &values[column.index];
        let value = if text == null_token {
            None
        } else {
            Some(Value::parse(column.column_type, text)?)
        };
        record.set(column.index, value);
    }
    Ok(record)
}
