use plod::commands::command_argument_builder;
use plod::handlers::{handle_query, init_tracing, list_methods};

#[tokio::main]
async fn main() {
    let cmd = command_argument_builder();
    let matches = cmd.get_matches();

    init_tracing(matches.get_count("verbose"));

    if matches.get_flag("list-methods") {
        print!("{}", list_methods());
        return;
    }

    let code = handle_query(&matches).await;
    if code != 0 {
        std::process::exit(code);
    }
}
