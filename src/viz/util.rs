use crossterm::event::{Event, KeyCode, KeyEventKind};

/// Takes an event, checks if it is a key press event, and returns the [`KeyCode`]
pub(super) fn event_keycode(event: &Event) -> Option<KeyCode> {
    let Event::Key(key) = event else {
        return None;
    };

    if key.kind != KeyEventKind::Press {
        return None;
    }

    Some(key.code)
}

/// `n` evenly spaced values covering `bounds`, both ends included
pub(super) fn ticks(bounds: [f64; 2], n: usize) -> Vec<f64> {
    match n {
        0 => vec![],
        1 => vec![bounds[0]],
        _ => (0..n)
            .map(|i| bounds[0] + (bounds[1] - bounds[0]) * i as f64 / (n - 1) as f64)
            .collect(),
    }
}

/// Compact training step label, e.g. `250k` or `1.5M`
pub(super) fn format_step(step: f64) -> String {
    let abs = step.abs();
    if abs >= 1e6 {
        format!("{:.1}M", step / 1e6)
    } else if abs >= 1e4 {
        format!("{:.0}k", step / 1e3)
    } else {
        format!("{step:.0}")
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyEvent, KeyModifiers};

    use super::*;

    #[test]
    fn keycode_only_on_press() {
        let press = Event::Key(KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE));
        assert_eq!(event_keycode(&press), Some(KeyCode::Char('q')));

        let mut release = KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE);
        release.kind = KeyEventKind::Release;
        assert_eq!(event_keycode(&Event::Key(release)), None);

        assert_eq!(event_keycode(&Event::FocusGained), None);
    }

    #[test]
    fn ticks_span_bounds() {
        assert_eq!(ticks([0.0, 100.0], 5), [0.0, 25.0, 50.0, 75.0, 100.0]);
        assert_eq!(ticks([-1.0, 1.0], 1), [-1.0]);
        assert!(ticks([0.0, 1.0], 0).is_empty());
    }

    #[test]
    fn step_labels() {
        assert_eq!(format_step(0.0), "0");
        assert_eq!(format_step(5000.0), "5000");
        assert_eq!(format_step(250_000.0), "250k");
        assert_eq!(format_step(1_500_000.0), "1.5M");
    }
}
