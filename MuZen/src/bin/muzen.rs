fn main() -> anyhow::Result<()> {
    muzen::cli::run_cli()
}
