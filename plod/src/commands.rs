use clap::{ArgAction, arg, value_parser};
use plod_core::OutputFormat;
use std::path::PathBuf;

pub fn command_argument_builder() -> clap::Command {
    clap::Command::new("plod")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Interact with the P-LOD triplestore")
        .bin_name("plod")
        .styles(CLAP_STYLING)
        .arg(arg!(-q --"quiet" "Suppress the progress spinner").required(false))
        .arg(
            arg!(-v --"verbose" "Log to stderr; repeat for more detail (-v info, -vv debug, -vvv trace)")
                .required(false)
                .action(ArgAction::Count),
        )
        .arg(
            arg!(-m --"method" <METHOD>)
                .required(false)
                .help("Accessor to call on the resource (default: label). See --list-methods"),
        )
        .arg(
            arg!(-p --"predicate" <IRI>)
                .required(false)
                .help("Predicate IRI for get_predicate_values (default: urn:p-lod:id:label)"),
        )
        .arg(
            arg!(-l --"level" <LEVEL>)
                .required(false)
                .help("Spatial resolution for depicted_where, e.g. space, property, insula (default: space)"),
        )
        .arg(
            arg!(-f --"format" <FORMAT>)
                .required(false)
                .help("Output format: text, json, rows, html")
                .value_parser(OutputFormat::NAMES)
                .default_value("text"),
        )
        .arg(
            arg!(-e --"endpoint" <URL>)
                .required(false)
                .help("SPARQL endpoint to query (overrides config and PLOD_ENDPOINT)"),
        )
        .arg(
            arg!(-t --"timeout" <SECONDS>)
                .required(false)
                .help("Request timeout in seconds")
                .value_parser(value_parser!(u64)),
        )
        .arg(
            arg!(-c --"config" <PATH>)
                .required(false)
                .help("Path to a JSON config file (default: ~/.config/plod/config.json)")
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            arg!(--"no-cache")
                .required(false)
                .help("Send every query to the endpoint, even repeated ones")
                .action(ArgAction::SetTrue),
        )
        .arg(
            arg!(--"list-methods")
                .required(false)
                .help("List the accessors that --method accepts and exit")
                .action(ArgAction::SetTrue),
        )
        .arg(
            arg!([IDENTIFIER])
                .help("P-LOD identifier, e.g. pompeii, r1-i9, urn:p-lod:id:ariadne")
                .required_unless_present("list-methods"),
        )
}

pub const CLAP_STYLING: clap::builder::styling::Styles = clap::builder::styling::Styles::styled()
    .header(clap_cargo::style::HEADER)
    .usage(clap_cargo::style::USAGE)
    .literal(clap_cargo::style::LITERAL)
    .placeholder(clap_cargo::style::PLACEHOLDER)
    .error(clap_cargo::style::ERROR)
    .valid(clap_cargo::style::VALID)
    .invalid(clap_cargo::style::INVALID);
