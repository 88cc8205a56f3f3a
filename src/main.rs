//! Command-line interface for xmlschema-core

#[cfg(feature = "cli")]
use clap::{Parser, Subcommand};

#[cfg(feature = "cli")]
use std::path::PathBuf;

#[cfg(feature = "cli")]
use xmlschema_core::datatypes::builtins::{self, XsdValue, XSD_QNAME};
#[cfg(feature = "cli")]
use xmlschema_core::datatypes::WhiteSpace;
#[cfg(feature = "cli")]
use xmlschema_core::documents::Document;
#[cfg(feature = "cli")]
use xmlschema_core::namespaces::NamespaceContext;
#[cfg(feature = "cli")]
use xmlschema_core::{GrammarSet, Walker};

#[cfg(feature = "cli")]
#[derive(Parser, Debug)]
#[command(name = "xsdcheck")]
#[command(author, version, about = "XSD datatype and content model checker", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[cfg(feature = "cli")]
#[derive(Subcommand, Debug)]
enum Commands {
    /// Validate a lexical value against a built-in XSD type
    Check {
        /// Built-in type name, e.g. anyURI or positiveInteger
        #[arg(value_name = "TYPE")]
        type_name: String,

        /// The lexical value
        #[arg(value_name = "VALUE")]
        value: String,

        /// Namespace binding used to resolve QName values
        #[arg(long = "ns", value_name = "PREFIX=URI")]
        namespaces: Vec<String>,

        /// Output the typed value as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Validate the element content of an XML document
    Content {
        /// JSON file with the context grammars
        #[arg(short, long, value_name = "GRAMMAR")]
        grammar: PathBuf,

        /// Path to the XML file to validate
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// List the built-in types
    Types,
}

#[cfg(feature = "cli")]
fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Check {
            type_name,
            value,
            namespaces,
            json,
        } => cmd_check(&type_name, &value, &namespaces, json),
        Commands::Content { grammar, file } => cmd_content(grammar, file),
        Commands::Types => cmd_types(),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

#[cfg(feature = "cli")]
fn cmd_check(
    type_name: &str,
    value: &str,
    bindings: &[String],
    json_output: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let typed = if type_name == XSD_QNAME {
        let mut namespaces = NamespaceContext::new();
        for binding in bindings {
            let (prefix, uri) = binding
                .split_once('=')
                .ok_or_else(|| format!("Invalid namespace binding: {}. Use PREFIX=URI", binding))?;
            if prefix.is_empty() {
                namespaces.set_default_namespace(uri)?;
            } else {
                namespaces.add_prefix(prefix, uri)?;
            }
        }
        namespaces
            .resolve_qname(&WhiteSpace::Collapse.normalize(value))
            .map(XsdValue::QName)
    } else {
        let builtin = builtins::lookup(type_name).ok_or_else(|| {
            format!(
                "Unknown type: {}. Run `xsdcheck types` for the supported types",
                type_name
            )
        })?;
        builtin.validate(value)
    };

    match typed {
        Ok(typed) if json_output => {
            println!("{}", serde_json::to_string_pretty(&typed)?);
            Ok(())
        }
        Ok(typed) => {
            println!("✓ valid {}: {}", type_name, typed);
            Ok(())
        }
        Err(e) => {
            println!("✗ {}", e);
            std::process::exit(1);
        }
    }
}

#[cfg(feature = "cli")]
fn cmd_content(grammar_path: PathBuf, file: PathBuf) -> Result<(), Box<dyn std::error::Error>> {
    let grammars = GrammarSet::from_file(&grammar_path)?;
    let doc = Document::from_file(&file)?;

    let report = Walker::new(&grammars).validate_document(&doc)?;

    if report.is_valid() {
        println!("✓ Document is valid");
        Ok(())
    } else {
        println!("✗ Document is invalid");
        println!();
        println!("Errors:");
        for error in &report.errors {
            println!("  - {}", error);
        }
        std::process::exit(1);
    }
}

#[cfg(feature = "cli")]
fn cmd_types() -> Result<(), Box<dyn std::error::Error>> {
    println!("xmlschema-core v{}", xmlschema_core::VERSION);
    println!();
    println!("Built-in types:");
    for name in builtins::names() {
        let white_space = builtins::lookup(name).map(|b| b.white_space);
        match white_space {
            Some(ws) => println!("  {} (whiteSpace: {})", name, ws),
            None => println!("  {}", name),
        }
    }
    println!("  {} (needs --ns bindings)", XSD_QNAME);
    Ok(())
}

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("CLI feature not enabled. Rebuild with --features cli");
    std::process::exit(1);
}
