//! Command-line interface for binder.

use std::path::PathBuf;

use binder::config::{
    DEFAULT_MARKER, DEFAULT_OUTPUT, DEFAULT_RESOURCE_EXT, GOBY_ERRORS_PACKAGE, GOBY_VM_PACKAGE,
    GeneratorConfig,
};
use clap::{ArgAction, Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "binder")]
#[command(about = "Generate Goby VM bindings for a Go type", long_about = None)]
pub struct Cli {
    /// Increase logging verbosity (-v: debug, -vv+: trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Write the bindings of one type
    Generate {
        /// Go source file to read
        #[arg(long = "in", value_name = "FILE")]
        input: PathBuf,

        /// Type to generate bindings for
        #[arg(long = "type", value_name = "NAME")]
        type_name: String,

        /// Output file
        #[arg(long, value_name = "FILE", default_value = DEFAULT_OUTPUT)]
        out: PathBuf,

        #[command(flatten)]
        generator: GeneratorArgs,
    },
    /// Print every type and method binder would expose
    List {
        /// Go source file to read
        #[arg(long = "in", value_name = "FILE")]
        input: PathBuf,

        /// Result type that marks a method as bindable
        #[arg(long, value_name = "NAME", default_value = DEFAULT_MARKER)]
        marker: String,
    },
}

#[derive(Args)]
pub struct GeneratorArgs {
    /// Result type that marks a method as bindable
    #[arg(long, value_name = "NAME", default_value = DEFAULT_MARKER)]
    pub marker: String,

    /// Import path of the VM package
    #[arg(long, value_name = "PATH", default_value = GOBY_VM_PACKAGE)]
    pub vm_package: String,

    /// Import path of the VM errors package
    #[arg(long, value_name = "PATH", default_value = GOBY_ERRORS_PACKAGE)]
    pub errors_package: String,

    /// Extension of the registered resource file
    #[arg(long, value_name = "EXT", default_value = DEFAULT_RESOURCE_EXT)]
    pub ext: String,
}

impl From<GeneratorArgs> for GeneratorConfig {
    fn from(args: GeneratorArgs) -> Self {
        GeneratorConfig {
            vm_package: args.vm_package,
            errors_package: args.errors_package,
            marker_type: args.marker,
            resource_ext: args.ext,
        }
    }
}
