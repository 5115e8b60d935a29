use anyhow::Context;
use clap::Parser;
use easel::{
    Circle, Config, Drawable, Graphics, HeadlessBackend, Image, Line, Oval, Point, Polygon,
    Rectangle, Text, Window, color_rgb,
};
use log::{info, warn};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "easel")]
#[command(
    version,
    long_version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("EASEL_GIT_HASH"), ")"),
    about = "Retained-mode 2D drawing with world coordinates and polled input"
)]
struct Cli {
    /// Render the built-in sample scene off-screen and save it as PNG
    #[arg(long, value_name = "PNG", conflicts_with = "convert")]
    snapshot: Option<PathBuf>,

    /// Decode an image file (png, jpg, gif, ppm, bmp) for re-encoding
    #[arg(long, value_name = "INPUT", requires = "output")]
    convert: Option<PathBuf>,

    /// Where --convert writes; the format follows the extension
    #[arg(long, short = 'o', value_name = "OUTPUT", requires = "convert")]
    output: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    if let Some(path) = cli.snapshot {
        let config = match Config::load() {
            Ok(loaded) => loaded.config,
            Err(e) => {
                warn!("Failed to load config: {}. Using defaults.", e);
                Config::default()
            }
        };
        snapshot(&path, config)?;
        println!("Wrote sample scene to {}", path.display());
    } else if let (Some(input), Some(output)) = (cli.convert, cli.output) {
        convert(&input, &output)?;
        println!("Converted {} -> {}", input.display(), output.display());
    } else {
        println!("easel: Retained-mode 2D drawing with world coordinates and polled input");
        println!();
        println!("Usage:");
        println!("  easel --snapshot scene.png              Render the sample scene to PNG");
        println!("  easel --convert in.png --output out.bmp Re-encode an image by extension");
        println!("  easel --help                            Show help");
        println!();
        println!("Configuration is read from ~/.config/easel/config.toml");
    }

    Ok(())
}

fn snapshot(path: &Path, config: Config) -> anyhow::Result<()> {
    let backend = HeadlessBackend::new();
    backend.set_antialias(config.render.antialias);
    let ctx = Graphics::with_config(backend.clone(), config);

    let win = Window::open_with(&ctx, "easel sample", 320, 240, false)?;
    draw_sample(&win)?;
    win.flush()?;

    backend
        .save_png(win.surface(), path)
        .with_context(|| format!("Failed to write snapshot to {}", path.display()))?;
    ctx.shutdown();
    Ok(())
}

/// A small scene touching every shape kind, in a 32x24 world.
fn draw_sample(win: &Window) -> easel::Result<()> {
    win.set_coords(0.0, 0.0, 32.0, 24.0)?;

    let board = Rectangle::new(&Point::new(2.0, 2.0), &Point::new(14.0, 10.0));
    board.set_fill("peachpuff")?;
    board.set_outline("darkgreen")?;
    board.set_width(2.0)?;
    board.draw(win)?;

    let sky = Oval::new(&Point::new(16.0, 2.0), &Point::new(30.0, 8.0));
    sky.set_fill(&color_rgb(100, 149, 237))?;
    sky.draw(win)?;

    let marker = Circle::new(&Point::new(22.0, 16.0), 4.0);
    marker.set_fill("red")?;
    marker.draw(win)?;

    let roof = Polygon::new(&[
        Point::new(2.0, 14.0),
        Point::new(8.0, 22.0),
        Point::new(14.0, 14.0),
    ])?;
    roof.set_fill("gold")?;
    roof.draw(win)?;

    let arrow = Line::new(&Point::new(16.0, 11.0), &Point::new(30.0, 11.0));
    arrow.set_arrow("both")?;
    arrow.set_width(2.0)?;
    arrow.draw(win)?;

    for i in 0..20 {
        win.plot(2.0 + f64::from(i) * 0.6, 12.0, "blue")?;
    }

    let title = Text::new(&Point::new(16.0, 21.0), "easel");
    title.set_size(18)?;
    title.set_style("bold")?;
    title.draw(win)?;

    info!("Sample scene drawn with {} objects", win.item_count());
    Ok(())
}

fn convert(input: &Path, output: &Path) -> anyhow::Result<()> {
    let ctx = Graphics::new(HeadlessBackend::new());
    let image = Image::load(&ctx, &Point::new(0.0, 0.0), input)
        .with_context(|| format!("Failed to read {}", input.display()))?;
    image
        .save(output)
        .with_context(|| format!("Failed to write {}", output.display()))?;
    info!(
        "Converted {}x{} image {} -> {}",
        image.get_width(),
        image.get_height(),
        input.display(),
        output.display()
    );
    Ok(())
}
