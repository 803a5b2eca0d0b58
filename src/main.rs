#[tokio::main]
async fn main() -> anyhow::Result<()> {
    defect_report_lib::init_logger("info");
    defect_report_lib::run().await
}
