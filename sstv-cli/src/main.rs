use std::path::{
    Path,
    PathBuf,
};

use clap::Parser;
use color_eyre::eyre::{
    Error,
    bail,
};
use image::{
    ImageReader,
    RgbImage,
    imageops::FilterType,
};
use sstv::{
    AudioFormat,
    GetSampleRate,
    Mode,
    Resolution,
    SstvEncoder,
};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Error> {
    let _ = dotenvy::dotenv();
    color_eyre::install()?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    tracing::debug!(?args);

    if args.list_modes {
        list_modes();
        return Ok(());
    }

    let (Some(input), Some(output)) = (&args.input, &args.output)
    else {
        bail!("Both an input image and an output file are required");
    };

    let format = AudioFormat::new(args.sample_rate)
        .with_channels(args.channels)
        .with_bit_depth(args.bit_depth);
    let encoder = SstvEncoder::from_mode(args.mode, format);

    println!("{} (VIS code {})", args.mode.name(), encoder.vis_code());

    let image = load_image(input, encoder.resolution())?;
    encoder.check_dimensions(&image)?;

    let buffer = encoder.encode(&image)?;
    sstv::sink::write_wav(output, &buffer)?;

    println!(
        "Wrote {} ({:.1} s at {} Hz)",
        output.display(),
        buffer.duration().as_secs_f32(),
        buffer.sample_rate()
    );

    Ok(())
}

/// Encode an image as an SSTV transmission and write it to a WAV file.
#[derive(Debug, Parser)]
struct Args {
    /// Image to send. Any format the image crate can decode.
    #[clap(required_unless_present = "list_modes")]
    input: Option<PathBuf>,

    /// WAV file to write.
    #[clap(required_unless_present = "list_modes")]
    output: Option<PathBuf>,

    /// Transmission mode, e.g. m1, s2, sdx, p5, r36, w2180.
    #[clap(short, long, env = "SSTV_MODE", default_value = "m1")]
    mode: Mode,

    #[clap(short, long, env = "SSTV_SAMPLE_RATE", default_value = "44100")]
    sample_rate: u32,

    /// Bits per sample: 8, 16, 24 or 32.
    #[clap(short, long, env = "SSTV_BIT_DEPTH", default_value = "16")]
    bit_depth: u16,

    /// Number of channels. Every channel carries the same signal.
    #[clap(short, long, env = "SSTV_CHANNELS", default_value = "1")]
    channels: u16,

    /// Print all supported modes and exit.
    #[clap(long)]
    list_modes: bool,
}

fn list_modes() {
    for mode in Mode::ALL {
        let encoder = SstvEncoder::from_mode(mode, AudioFormat::default());
        let resolution = mode.resolution();
        let duration = encoder
            .transmission_time(resolution)
            .map(|duration| format!("{:.1} s", duration.as_secs_f32()))
            .unwrap_or_default();
        println!(
            "{:<6} {:<16} {} {:>9} {:>8}",
            mode.short_name(),
            mode.name(),
            mode.vis_code(),
            resolution.to_string(),
            duration
        );
    }
}

/// Loads an image and scales it to the resolution of the mode, if necessary.
fn load_image(path: &Path, resolution: Resolution) -> Result<RgbImage, Error> {
    let image = ImageReader::open(path)?.decode()?;

    let width = resolution.width as u32;
    let height = resolution.height as u32;
    let image = if image.width() != width || image.height() != height {
        tracing::info!(
            from = %Resolution::new(image.width() as usize, image.height() as usize),
            to = %resolution,
            "resizing image"
        );
        image.resize_exact(width, height, FilterType::Lanczos3)
    }
    else {
        image
    };

    Ok(image.into_rgb8())
}
