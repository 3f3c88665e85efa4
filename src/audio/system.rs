//! Audio system: Glicol synthesis played through cpal, with a shared waveform history.

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use glicol::Engine;
use std::fs::File;
use std::io::BufWriter;
use std::sync::{Arc, Mutex};

use super::source::{WaveformRing, WaveformSource};
use super::synthesis::GLICOL_COMPOSITION;
use crate::error::AudioError;
use crate::params::{audio_constants::BLOCK_SIZE, AudioConfig, RecordingConfig};

type WavRecorder = hound::WavWriter<BufWriter<File>>;

/// Audio system managing synthesis playback and the waveform history
pub struct AudioSystem {
    /// Most recent mono samples, written by the output callback
    waveform: Arc<Mutex<WaveformRing>>,

    /// WAV writer while recording, taken on finish
    recorder: Arc<Mutex<Option<WavRecorder>>>,

    /// Audio output stream (kept alive)
    _stream: cpal::Stream,
}

impl AudioSystem {
    /// Create and start audio system with specified configuration
    pub fn new(
        config: AudioConfig,
        recording_config: Option<&RecordingConfig>,
    ) -> Result<Self, AudioError> {
        config.validate()?;

        // Setup audio output device
        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or(AudioError::NoOutputDevice)?;
        let output_config = device.default_output_config()?;
        let sample_rate = output_config.sample_rate().0;
        let channels = output_config.channels() as usize;

        log::info!(
            "Audio: {} @ {}Hz, {} channels",
            device.name().unwrap_or_else(|_| "Unknown".to_string()),
            sample_rate,
            channels
        );

        // Create WAV writer if recording
        let recorder = match recording_config {
            Some(rec) => {
                let spec = hound::WavSpec {
                    channels: 2,
                    sample_rate,
                    bits_per_sample: 32,
                    sample_format: hound::SampleFormat::Float,
                };
                let path = rec.audio_path();
                log::info!("Recording audio to {}", path);
                Some(hound::WavWriter::create(&path, spec)?)
            }
            None => None,
        };
        let recorder = Arc::new(Mutex::new(recorder));
        let recorder_cb = Arc::clone(&recorder);

        // Create Glicol engine
        let mut engine = Engine::<BLOCK_SIZE>::new();
        engine.set_sr(sample_rate as usize);
        engine.update_with_code(GLICOL_COMPOSITION);
        engine
            .update()
            .map_err(|e| AudioError::Synth(format!("{:?}", e)))?;

        let waveform = Arc::new(Mutex::new(WaveformRing::new(config.waveform_len)));
        let waveform_cb = Arc::clone(&waveform);
        let clip = config.clip_level;

        // Build audio output stream
        let stream = device.build_output_stream(
            &output_config.into(),
            move |data: &mut [f32], _: &cpal::OutputCallbackInfo| {
                let mut ring = match waveform_cb.lock() {
                    Ok(ring) => ring,
                    Err(_) => return,
                };
                let mut recorder = recorder_cb.lock().ok();

                let frames_needed = data.len() / channels;
                let mut frame_idx = 0;

                // Generate multiple blocks if needed to fill the entire buffer
                while frame_idx < frames_needed {
                    let (buffers, _) = engine.next_block(vec![]);
                    let samples_to_copy = (frames_needed - frame_idx).min(BLOCK_SIZE);

                    for i in 0..samples_to_copy {
                        // Hard clip so a runaway patch cannot blast the speakers
                        let left = buffers[0][i].clamp(-clip, clip);
                        let right = buffers[1][i].clamp(-clip, clip);

                        let out = &mut data[(frame_idx + i) * channels..][..channels];
                        for (ch, slot) in out.iter_mut().enumerate() {
                            *slot = if ch % 2 == 0 { left } else { right };
                        }

                        ring.push(0.5 * (left + right));

                        if let Some(Some(writer)) = recorder.as_deref_mut() {
                            let _ = writer.write_sample(left);
                            let _ = writer.write_sample(right);
                        }
                    }

                    frame_idx += samples_to_copy;
                }
            },
            |err| log::error!("Audio stream error: {}", err),
            None,
        )?;

        stream.play()?;

        Ok(Self {
            waveform,
            recorder,
            _stream: stream,
        })
    }

    /// Finalize the WAV recording, if any
    pub fn finish_recording(&self) {
        let writer = match self.recorder.lock() {
            Ok(mut guard) => guard.take(),
            Err(_) => None,
        };
        if let Some(writer) = writer {
            match writer.finalize() {
                Ok(()) => log::info!("Audio recording finalized"),
                Err(e) => log::error!("Failed to finalize audio recording: {}", e),
            }
        }
    }
}

impl WaveformSource for AudioSystem {
    fn read_waveform(&self, out: &mut [f32]) -> bool {
        self.waveform.read_waveform(out)
    }
}
