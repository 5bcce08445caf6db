use shape_viewer::{config::ViewerConfig, flow};

fn main() -> anyhow::Result<()> {
    flow::run(ViewerConfig::default())
}
