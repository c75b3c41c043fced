fn main() -> anyhow::Result<()> {
    nurture_coach_lib::run()
}
