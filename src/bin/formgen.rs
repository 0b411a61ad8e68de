//! formgen CLI
//!
//! Command-line interface for validating form schemas, rendering field
//! descriptors, and checking submissions.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use formgen::{
    load_json, load_text, parse_schema, serialize_submission, CompiledSchema, FormController,
    FormError, FormSchema, SubmissionRecord, ValidateError,
};

#[derive(Parser)]
#[command(name = "formgen")]
#[command(about = "Validate form schemas and submissions")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a schema against the FormSchema contract
    Validate {
        /// Schema source: file path, or - for stdin
        schema: String,

        /// Output results as JSON (for automation)
        #[arg(long)]
        json: bool,
    },

    /// Render a schema as field descriptors
    Render {
        /// Schema source: file path, or - for stdin
        schema: String,

        /// Output file (stdout if not specified)
        #[arg(long)]
        output: Option<PathBuf>,

        /// Pretty-print JSON output
        #[arg(long)]
        pretty: bool,
    },

    /// Validate answers against a schema and produce the submission artifact
    Submit {
        /// Schema source: file path, or - for stdin
        schema: String,

        /// Answers file: a JSON object mapping field id to value
        answers: String,

        /// Write the artifact to this file (stdout if not specified)
        #[arg(long)]
        output: Option<PathBuf>,

        /// Output results as JSON (for automation)
        #[arg(long)]
        json: bool,
    },

    /// Print the built-in sample schema
    Sample {
        /// Pretty-print JSON output
        #[arg(long)]
        pretty: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Validate { schema, json } => run_validate(&schema, json),
        Commands::Render {
            schema,
            output,
            pretty,
        } => run_render(&schema, output, pretty),
        Commands::Submit {
            schema,
            answers,
            output,
            json,
        } => run_submit(&schema, &answers, output, json),
        Commands::Sample { pretty } => run_sample(pretty),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(code) => ExitCode::from(code),
    }
}

/// Load and validate a schema source, reporting errors in the requested format.
fn load_schema(source: &str, json_output: bool) -> Result<FormSchema, u8> {
    let text = load_text(source).map_err(|e| {
        report_error(json_output, &e.to_string());
        e.exit_code() as u8
    })?;

    parse_schema(&text).map_err(|e| {
        match &e {
            ValidateError::Invalid { errors } => {
                if json_output {
                    let output = serde_json::json!({
                        "valid": false,
                        "errors": errors
                    });
                    println!("{}", output);
                } else {
                    eprintln!("Schema validation failed:");
                    for error in errors {
                        eprintln!("  {}", error);
                    }
                }
            }
            other => report_error(json_output, &other.to_string()),
        }
        e.exit_code() as u8
    })
}

fn run_validate(source: &str, json_output: bool) -> Result<(), u8> {
    load_schema(source, json_output)?;

    if json_output {
        println!(r#"{{"valid":true}}"#);
    } else {
        println!("Valid");
    }
    Ok(())
}

fn run_render(source: &str, output: Option<PathBuf>, pretty: bool) -> Result<(), u8> {
    let schema = load_schema(source, false)?;

    let compiled = CompiledSchema::compile(schema).map_err(|e| {
        eprintln!("Error: {}", e);
        e.exit_code() as u8
    })?;

    let rendered = compiled.rendered();
    let json_output = if pretty {
        serde_json::to_string_pretty(&rendered)
    } else {
        serde_json::to_string(&rendered)
    }
    .map_err(|e| {
        eprintln!("Error serializing output: {}", e);
        2u8
    })?;

    write_output(output, &json_output)
}

fn run_submit(
    schema_source: &str,
    answers_source: &str,
    output: Option<PathBuf>,
    json_output: bool,
) -> Result<(), u8> {
    let schema = load_schema(schema_source, json_output)?;

    let answers = load_json(answers_source).map_err(|e| {
        report_error(json_output, &format!("loading answers: {}", e));
        e.exit_code() as u8
    })?;

    let Some(answers) = answers.as_object() else {
        report_error(json_output, "answers must be a JSON object of field values");
        return Err(2);
    };

    let compiled = CompiledSchema::compile(schema).map_err(|e| {
        report_error(json_output, &e.to_string());
        e.exit_code() as u8
    })?;
    let mut form = FormController::new(compiled);

    for (id, value) in answers {
        let Some(value) = value.as_str() else {
            report_error(
                json_output,
                &format!("answer for '{}' must be a string", id),
            );
            return Err(2);
        };
        form.set_value(id, value).map_err(|e| {
            report_error(json_output, &e.to_string());
            e.exit_code() as u8
        })?;
    }

    let record: SubmissionRecord = match form.submit() {
        Ok(record) => record.clone(),
        Err(FormError::Invalid { errors }) => {
            if json_output {
                let output = serde_json::json!({
                    "valid": false,
                    "errors": errors
                });
                println!("{}", output);
            } else {
                eprintln!("Submission blocked:");
                for error in &errors {
                    eprintln!("  {}", error);
                }
            }
            return Err(1);
        }
        Err(e) => {
            report_error(json_output, &e.to_string());
            return Err(e.exit_code() as u8);
        }
    };

    let body = serialize_submission(&record).map_err(|e| {
        report_error(json_output, &format!("serializing submission: {}", e));
        2u8
    })?;

    write_output(output, &body)
}

fn run_sample(pretty: bool) -> Result<(), u8> {
    let sample = FormSchema::sample();
    let json_output = if pretty {
        serde_json::to_string_pretty(&sample)
    } else {
        serde_json::to_string(&sample)
    }
    .map_err(|e| {
        eprintln!("Error serializing output: {}", e);
        2u8
    })?;

    println!("{}", json_output);
    Ok(())
}

/// Write to a file, or stdout when no output path was given.
fn write_output(output: Option<PathBuf>, content: &str) -> Result<(), u8> {
    match output {
        Some(path) => {
            std::fs::write(&path, content).map_err(|e| {
                eprintln!("Error writing to {}: {}", path.display(), e);
                3u8
            })?;
        }
        None => {
            println!("{}", content);
        }
    }
    Ok(())
}

/// Output an error message in plain text or JSON format.
fn report_error(json_output: bool, msg: &str) {
    if json_output {
        let output = serde_json::json!({ "valid": false, "error": msg });
        println!("{}", output);
    } else {
        eprintln!("Error: {}", msg);
    }
}
