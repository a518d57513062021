//! randsynth - plays a looping arpeggio through the default output device
//!
//! Run with: cargo run --release
//! A new random patch is drawn every four bars. `RUST_LOG=randsynth=debug`
//! shows voice stealing and patch generation.

mod player;

use std::{thread, time::Duration};

use color_eyre::eyre::{eyre, Result as EyreResult};
use randsynth::{synth::message::SynthMessage, SynthConfig};
use tracing_subscriber::EnvFilter;

use player::Player;

/// Minor ninth arpeggio over a slow bass walk.
const ARPEGGIO: [u8; 8] = [57, 60, 64, 67, 71, 67, 64, 60];
const BASS: [u8; 4] = [33, 36, 29, 31];
const STEP: Duration = Duration::from_millis(150);

fn main() -> EyreResult<()> {
    color_eyre::install()?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = SynthConfig::default().with_voices(12);
    let (player, mut tx) = Player::start(config)?;
    println!("=== randsynth ===");
    println!("Sample rate: {} Hz", player.sample_rate());
    println!("Playing... Press Ctrl+C to stop");

    let mut send = |msg: SynthMessage| {
        tx.push(msg)
            .map_err(|_| eyre!("control queue full, audio thread stalled"))
    };

    send(SynthMessage::RandomPatch)?;
    for bar in 0usize.. {
        let bass = BASS[bar % BASS.len()];
        if bar % 4 == 0 && bar > 0 {
            send(SynthMessage::RandomPatch)?;
        }
        send(SynthMessage::NoteOn {
            note: bass,
            velocity: 90,
        })?;

        for (step, &note) in ARPEGGIO.iter().enumerate() {
            let velocity = if step % 4 == 0 { 110 } else { 80 };
            send(SynthMessage::NoteOn { note, velocity })?;
            thread::sleep(STEP);
            send(SynthMessage::NoteOff { note })?;
        }
        send(SynthMessage::NoteOff { note: bass })?;
    }

    Ok(())
}
