//! Procedural music for the landscape to react to.

/// Glicol composition: a slow arpeggiated lead over a pulsing bass, with the
/// lead's filter sweeping so loudness rises and falls over several bars
pub const GLICOL_COMPOSITION: &str = r#"
~gate: speed 4.0 >> seq 57 _57 _~a 64 _~a 60 _
~a: choose 57 60 64 67 69 72 0 0
~amp: ~gate >> envperc 0.003 0.35
~pit: ~gate >> mul 220.0
~lead: saw ~pit >> mul ~amp >> lpf ~sweep 3.0 >> mul 0.12
~sweep: sin 0.07 >> mul 1600 >> add 1900
~kick: speed 2.0 >> seq 60 _ 60 _
~bamp: ~kick >> envperc 0.001 0.25
~bass: sin 55.0 >> mul ~bamp >> mul 0.3
~swell: sin 0.05 >> mul 0.4 >> add 0.6
o: mix ~lead ~bass >> mul ~swell >> plate 0.15
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::audio_constants::BLOCK_SIZE;
    use glicol::Engine;

    #[test]
    fn test_composition_parses() {
        let mut engine = Engine::<BLOCK_SIZE>::new();
        engine.set_sr(44100);
        engine.update_with_code(GLICOL_COMPOSITION);
        assert!(engine.update().is_ok());

        let (buffers, _) = engine.next_block(vec![]);
        for i in 0..BLOCK_SIZE {
            assert!(buffers[0][i].is_finite());
            assert!(buffers[1][i].is_finite());
        }
    }
}
