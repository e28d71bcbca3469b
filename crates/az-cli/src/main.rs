//! Azimuth — stereo sound source separation
//!
//! Usage:
//!   azimuth -i input.wav -o output.wav
//!   azimuth -i mix -o vocals -m spectral-difference -w 8k -v 4
//!   azimuth -i mix.wav -o karaoke.wav -m mixture --weights +1,-1,0 -g 3 -d
//!
//! Splits a stereo recording by its azimuth cue and folds it to mono.
//! Any configuration or input-shape error aborts with a non-zero exit
//! status before the output file is written.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::{bail, Context, Result};
use clap::Parser;

use az_dsp::{MixMode, MixWeights, Stft};
use az_offline::{SeparationConfig, SeparationPipeline, WavDecoder, WavEncoder};
use az_viz::SpectrogramImage;

#[derive(Parser)]
#[command(
    name = "azimuth",
    version,
    about = "stereo sound source separation",
    long_about = "Separates a stereo recording into a mono signal by exploiting \
                  inter-channel amplitude differences (the azimuth cue)."
)]
struct Cli {
    /// Input stereo .wav file name
    #[arg(short = 'i', long)]
    input: PathBuf,

    /// Output mono .wav file name
    #[arg(short = 'o', long)]
    output: PathBuf,

    /// Swap source channels
    #[arg(short = 's', long)]
    swap: bool,

    /// STFT window size (integer, or `<N>k` for N x 1024)
    #[arg(short = 'w', long, default_value = "4k")]
    window: String,

    /// STFT window overlap factor (must divide the window size)
    #[arg(short = 'v', long, default_value_t = 4)]
    overlap: usize,

    /// Mix mode. `difference` is the plain time-domain channel
    /// difference (the default); `spectral-difference`, `product` and
    /// `mixture` recombine spectral magnitudes with the phase of the
    /// channel sum
    #[arg(short = 'm', long, default_value = "difference",
          value_parser = MixMode::from_str)]
    mode: MixMode,

    /// Mixture weights for (|L|, |R|, |C|), comma separated, up to 3
    /// values (missing ones default to zero)
    #[arg(long, default_value = "+1,-1,0", value_name = "W0,W1,W2")]
    weights: String,

    /// Output gain in dB
    #[arg(short = 'g', long, default_value_t = 0.0)]
    gain: f64,

    /// Plot spectrograms before and after processing
    #[arg(short = 'd', long)]
    debug: bool,
}

/// Parse a window size, accepting the `<N>k` shorthand for N x 1024
fn parse_window_size(value: &str) -> Result<usize> {
    let value = value.trim();

    let size = if let Some(kilo) = value.strip_suffix(['k', 'K']) {
        kilo.parse::<usize>()
            .with_context(|| format!("invalid window size: {}", value))?
            * 1024
    } else {
        value
            .parse::<usize>()
            .with_context(|| format!("invalid window size: {}", value))?
    };

    if size == 0 {
        bail!("window size must be positive");
    }
    Ok(size)
}

/// Parse comma-separated mixture weights, zero-padded to 3
fn parse_weights(value: &str) -> Result<MixWeights> {
    let parsed: Vec<f64> = value
        .split(',')
        .map(|w| {
            w.trim()
                .parse::<f64>()
                .with_context(|| format!("invalid mixture weight: {}", w.trim()))
        })
        .collect::<Result<_>>()?;

    MixWeights::from_slice(&parsed).map_err(Into::into)
}

fn run(cli: &Cli) -> Result<()> {
    let framesize = parse_window_size(&cli.window)?;
    if cli.overlap == 0 || framesize % cli.overlap != 0 {
        bail!(
            "overlap factor {} does not divide window size {}",
            cli.overlap,
            framesize
        );
    }
    let hopsize = framesize / cli.overlap;

    let config = SeparationConfig::new(framesize, hopsize)
        .with_mode(cli.mode)
        .with_weights(parse_weights(&cli.weights)?)
        .with_swap(cli.swap)
        .with_gain_db(cli.gain);

    let input = WavDecoder::decode(&cli.input)
        .with_context(|| format!("reading {}", cli.input.display()))?;

    let pipeline = SeparationPipeline::new(config);
    let output = pipeline
        .process(&input)
        .context("separation failed")?;

    if cli.debug {
        plot_spectrograms(&cli.output, framesize, hopsize, &input, &output)
            .context("rendering debug spectrograms")?;
    }

    WavEncoder::encode(&cli.output, &output)
        .with_context(|| format!("writing {}", cli.output.display()))?;

    Ok(())
}

/// Render pre (left input channel) and post (separated output)
/// spectrograms next to the output file
fn plot_spectrograms(
    output_path: &Path,
    framesize: usize,
    hopsize: usize,
    input: &az_offline::AudioBuffer,
    output: &az_offline::AudioBuffer,
) -> Result<()> {
    let stft = Stft::new(framesize, hopsize)?;
    let image = SpectrogramImage::default();

    let stem = output_path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("azimuth");

    let pre_path = output_path.with_file_name(format!("{}-pre.png", stem));
    let post_path = output_path.with_file_name(format!("{}-post.png", stem));

    image.render(&stft.forward(&input.get_channel(0)), &pre_path)?;
    image.render(&stft.forward(&output.samples), &post_path)?;

    Ok(())
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    run(&cli)
}
