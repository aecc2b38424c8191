//! Writing encoded signals to WAV files.

use std::{
    fs::File,
    io::{
        BufWriter,
        Seek,
        Write,
    },
    path::Path,
};

use crate::{
    format::AudioFormat,
    writer::SampleBuffer,
};

#[derive(Debug, thiserror::Error)]
#[error("wav sink error")]
pub enum Error {
    Hound(#[from] hound::Error),
    #[error("unsupported bit depth: {bit_depth}")]
    UnsupportedBitDepth {
        bit_depth: u16,
    },
    #[error("sample buffer has format {actual:?}, but sink expects {expected:?}")]
    FormatMismatch {
        expected: AudioFormat,
        actual: AudioFormat,
    },
    Closed,
}

fn spec(format: &AudioFormat) -> Result<hound::WavSpec, Error> {
    match format.bit_depth {
        8 | 16 | 24 | 32 => {
            Ok(hound::WavSpec {
                channels: format.channels,
                sample_rate: format.sample_rate,
                bits_per_sample: format.bit_depth,
                sample_format: hound::SampleFormat::Int,
            })
        }
        bit_depth => Err(Error::UnsupportedBitDepth { bit_depth }),
    }
}

/// Integer PCM WAV writer. Every mono sample is written once per channel.
#[derive(derive_more::Debug)]
pub struct WavSink<W>
where
    W: Write + Seek,
{
    #[debug(skip)]
    inner: Option<hound::WavWriter<W>>,
    format: AudioFormat,
}

impl<W> WavSink<W>
where
    W: Write + Seek,
{
    #[inline]
    pub fn new(inner: hound::WavWriter<W>, format: AudioFormat) -> Self {
        Self {
            inner: Some(inner),
            format,
        }
    }

    pub fn from_writer(writer: W, format: AudioFormat) -> Result<Self, Error> {
        Ok(Self::new(hound::WavWriter::new(writer, spec(&format)?)?, format))
    }

    #[inline]
    fn writer_mut(&mut self) -> Result<&mut hound::WavWriter<W>, Error> {
        self.inner.as_mut().ok_or(Error::Closed)
    }

    #[inline]
    pub fn format(&self) -> AudioFormat {
        self.format
    }

    /// Appends the samples of `buffer`, which must have the sink's format.
    pub fn write_buffer(&mut self, buffer: &SampleBuffer) -> Result<(), Error> {
        if buffer.format() != self.format {
            return Err(Error::FormatMismatch {
                expected: self.format,
                actual: buffer.format(),
            });
        }

        let channels = self.format.channels;
        let peak = self.format.peak_amplitude();
        let bit_depth = self.format.bit_depth;
        let writer = self.writer_mut()?;

        for sample in buffer.samples() {
            // samples are already scaled to the peak amplitude
            let value = sample.round().clamp(-peak, peak);
            for _ in 0..channels {
                match bit_depth {
                    8 => writer.write_sample(value as i8)?,
                    16 => writer.write_sample(value as i16)?,
                    _ => writer.write_sample(value as i32)?,
                }
            }
        }

        Ok(())
    }

    pub fn flush(&mut self) -> Result<(), Error> {
        self.writer_mut()?.flush()?;
        Ok(())
    }

    /// Writes the header and closes the file. Further writes fail with
    /// [`Error::Closed`].
    pub fn finalize(&mut self) -> Result<(), Error> {
        if let Some(writer) = self.inner.take() {
            writer.finalize()?;
        }
        Ok(())
    }
}

impl WavSink<BufWriter<File>> {
    pub fn from_path(path: impl AsRef<Path>, format: AudioFormat) -> Result<Self, Error> {
        Ok(Self::new(hound::WavWriter::create(path, spec(&format)?)?, format))
    }
}

pub fn write_wav(path: impl AsRef<Path>, buffer: &SampleBuffer) -> Result<(), Error> {
    let path = path.as_ref();
    tracing::debug!(path = %path.display(), num_samples = buffer.len(), "writing wav");

    let mut sink = WavSink::from_path(path, buffer.format())?;
    sink.write_buffer(buffer)?;
    sink.finalize()
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use crate::{
        format::AudioFormat,
        sink::{
            Error,
            WavSink,
            write_wav,
        },
        writer::{
            ToneWriter,
            WritePulse,
        },
    };

    fn tone(format: AudioFormat) -> crate::writer::SampleBuffer {
        let mut writer = ToneWriter::new(format);
        writer.write(2000.0, 0.01);
        writer.finish()
    }

    #[test]
    fn writes_16_bit_mono() {
        let format = AudioFormat::new(8000);
        let buffer = tone(format);

        let mut data = vec![];
        {
            let mut sink = WavSink::from_writer(Cursor::new(&mut data), format).unwrap();
            sink.write_buffer(&buffer).unwrap();
            sink.finalize().unwrap();
        }

        let reader = hound::WavReader::new(Cursor::new(&data)).unwrap();
        let spec = reader.spec();
        assert_eq!(spec.channels, 1);
        assert_eq!(spec.sample_rate, 8000);
        assert_eq!(spec.bits_per_sample, 16);

        let samples = reader
            .into_samples::<i16>()
            .collect::<Result<Vec<_>, _>>()
            .unwrap();
        assert_eq!(samples.len(), 80);
        // 2000 Hz at 8 kHz: quarter period per sample
        assert_eq!(&samples[..4], &[32767, 0, -32767, 0]);
    }

    #[test]
    fn duplicates_samples_per_channel() {
        let format = AudioFormat::new(8000).with_channels(2).with_bit_depth(24);
        let buffer = tone(format);

        let mut data = vec![];
        {
            let mut sink = WavSink::from_writer(Cursor::new(&mut data), format).unwrap();
            sink.write_buffer(&buffer).unwrap();
            sink.finalize().unwrap();
        }

        let reader = hound::WavReader::new(Cursor::new(&data)).unwrap();
        assert_eq!(reader.spec().channels, 2);
        let samples = reader
            .into_samples::<i32>()
            .collect::<Result<Vec<_>, _>>()
            .unwrap();
        assert_eq!(samples.len(), 160);
        assert_eq!(&samples[..4], &[8388607, 8388607, 0, 0]);
    }

    #[test]
    fn rejects_unsupported_bit_depth() {
        let format = AudioFormat::new(8000).with_bit_depth(12);
        let result = WavSink::from_writer(Cursor::new(Vec::<u8>::new()), format);
        assert!(matches!(
            result,
            Err(Error::UnsupportedBitDepth { bit_depth: 12 })
        ));
    }

    #[test]
    fn rejects_other_format() {
        let buffer = tone(AudioFormat::new(8000));
        let mut sink =
            WavSink::from_writer(Cursor::new(Vec::<u8>::new()), AudioFormat::new(44100)).unwrap();
        assert!(matches!(
            sink.write_buffer(&buffer),
            Err(Error::FormatMismatch { .. })
        ));
    }

    #[test]
    fn closed_after_finalize() {
        let format = AudioFormat::new(8000);
        let mut sink = WavSink::from_writer(Cursor::new(Vec::<u8>::new()), format).unwrap();
        sink.finalize().unwrap();
        assert!(matches!(sink.write_buffer(&tone(format)), Err(Error::Closed)));
    }

    #[test]
    fn write_wav_to_file() {
        let directory = tempfile::tempdir().unwrap();
        let path = directory.path().join("tone.wav");
        let buffer = tone(AudioFormat::new(8000));
        write_wav(&path, &buffer).unwrap();

        let reader = hound::WavReader::open(&path).unwrap();
        assert_eq!(reader.len(), 80);
    }
}
