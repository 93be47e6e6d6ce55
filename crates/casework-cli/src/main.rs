//! `casework` binary

fn main() -> anyhow::Result<()> {
    let matches = casework_cli::command().get_matches();
    casework_cli::init_tracing(matches.get_flag("log-json"))?;

    let output = casework_cli::run(&matches)?;
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
