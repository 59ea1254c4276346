//! Built-in procedural music used when no track is given.

/// Glicol composition (procedural music code)
///
/// A bass-heavy pulse with a filtered lead on top, so both halves of the
/// spectrum move and the bass regularly crosses the vibration threshold.
pub const GLICOL_COMPOSITION: &str = r#"
~gate: speed 2.0 >> seq 60 _60 _~a 48
~a: choose 48 48 48 72 0 0 0
~amp: ~gate >> envperc 0.001 0.3
~pit: ~gate >> mul 55.0
~kick: sin ~pit >> mul ~amp >> mul 0.8
~lead_gate: speed 4.0 >> seq 60 _ 67 _~b
~b: choose 60 67 72 79
~lead_amp: ~lead_gate >> envperc 0.001 0.1
~lead_pit: ~lead_gate >> mul 523.25
~lead: saw ~lead_pit >> mul ~lead_amp >> lpf ~mod 5.0 >> mul 0.1
~mod: sin 0.2 >> mul 1300 >> add 1500
o: mix ~kick ~lead >> plate 0.1
"#;
