fn main() -> anyhow::Result<()> {
    growthbench::run()
}
