fn main() -> anyhow::Result<()> {
    pesmodel::cli::run_cli()
}
