use std::fs::File;
use std::io::BufWriter;

use anyhow::Context as _;
use vidpipe::{Encoder, Options, Y4mBackend};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "target/vidpipe_demo.y4m".to_string());
    let out = File::create(&path).with_context(|| format!("create '{path}'"))?;

    let opts = Options::new(320, 180, 30);
    let mut enc = Encoder::open(Y4mBackend::new(), &opts, BufWriter::new(out))
        .context("open encoder")?;

    for i in 0..90u32 {
        let frame = image::RgbaImage::from_fn(320, 180, |x, y| {
            let a = if (x + i * 3) % 64 < 32 { 255 } else { 96 };
            image::Rgba([(x + i) as u8, (y * 2) as u8, (i * 4) as u8, a])
        });
        enc.encode(&frame)
            .with_context(|| format!("encode frame {i}"))?;
    }
    enc.flush().context("flush encoder")?;

    let stats = enc.stats();
    enc.close();
    println!(
        "wrote {} frames, {} units, {} bytes to {path}",
        stats.frames_submitted, stats.units_written, stats.bytes_written
    );
    Ok(())
}
