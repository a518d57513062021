mod common;

use randsynth::synth::{allocator::ResourcePool, voice::VoiceState};

#[test]
fn fifth_note_steals_the_oldest_voice() {
    let mut synth = common::synth(4);
    let slots: Vec<usize> = [60, 62, 64, 65]
        .iter()
        .map(|&note| synth.note_on(note, 100).unwrap().voice)
        .collect();
    assert_eq!(slots, [0, 1, 2, 3]);

    let stolen = synth.note_on(67, 100).unwrap();
    let pool = synth.poly().voice_pool();
    assert_eq!(stolen.voice, slots[0]);
    assert_eq!(pool.lookup(60), None);
    assert_eq!(pool.lookup(67), Some(slots[0]));
    for (note, slot) in [(62, 1), (64, 2), (65, 3)] {
        assert_eq!(pool.lookup(note), Some(slot));
    }
}

#[test]
fn stolen_voice_is_regated_for_the_new_note() {
    let mut synth = common::synth(2);
    synth.note_on(60, 100);
    synth.note_on(64, 100);
    common::render(&mut synth, 4);

    let stolen = synth.note_on(67, 100).unwrap();
    let voice = synth.poly().voice(stolen.voice).unwrap();
    assert_eq!(voice.note(), Some(67));
    assert_eq!(voice.state(), VoiceState::Active);
    assert!(voice.is_active());
}

#[test]
fn steals_follow_assignment_order_under_churn() {
    let mut pool = ResourcePool::new(3);
    for key in 0u8..3 {
        pool.assign(key);
    }
    // Each further note evicts whichever slot was assigned longest ago.
    for key in 3u8..30 {
        let expected = (0..3).min_by_key(|&i| pool.stamp(i)).unwrap();
        assert_eq!(pool.assign(key), expected);
        assert!(pool.stamp(expected) > (0..3).filter(|&i| i != expected).map(|i| pool.stamp(i)).max().unwrap());
    }
}

#[test]
fn release_then_lookup_misses() {
    let mut pool = ResourcePool::new(4);
    for key in [10u8, 20, 30] {
        let slot = pool.assign(key);
        assert_eq!(pool.release(key), Some(slot));
        assert_eq!(pool.lookup(key), None);
    }
    assert_eq!(pool.release(99), None);
}

#[test]
fn released_voices_ring_out_before_reuse() {
    let mut synth = common::synth(4);
    synth.note_on(60, 100);
    synth.note_off(60);

    // Slot 0 is free in the pool but still releasing; a silent voice wins.
    assert_eq!(synth.note_on(62, 100).unwrap().voice, 1);

    // Once the release has finished, slot 0 is the first silent free voice again.
    common::render(&mut synth, 400);
    assert_eq!(synth.poly().voice(0).unwrap().state(), VoiceState::Free);
    assert_eq!(synth.note_on(64, 100).unwrap().voice, 0);
}
