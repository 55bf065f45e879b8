use anyhow::Result;

fn main() -> Result<()> {
    import_injector::run_cli()
}
