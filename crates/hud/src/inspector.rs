use ironsight_kernel::{Session, SessionStats};
use serde::Serialize;

/// Session inspector for developer tooling.
///
/// Read-only queries against a session for debugging and headless runs.
pub struct SessionInspector;

impl SessionInspector {
    /// Produce a summary of the session state.
    pub fn summary(session: &Session) -> SessionSummary {
        let player = session.player();
        SessionSummary {
            session: session.id().short(),
            tick: session.tick_count(),
            elapsed_ms: session.clock().as_millis() as u64,
            health: player.health,
            ammo: player.ammo,
            reloading: player.reloading,
            position: player.position.to_array(),
            enemies_alive: session.world().enemy_count(),
            projectiles_in_flight: session.projectiles().len(),
            stats: session.stats().clone(),
        }
    }
}

/// Summary of session state for the inspector.
#[derive(Debug, Clone, Serialize)]
pub struct SessionSummary {
    pub session: String,
    pub tick: u64,
    pub elapsed_ms: u64,
    pub health: i32,
    pub ammo: u32,
    pub reloading: bool,
    pub position: [f32; 3],
    pub enemies_alive: usize,
    pub projectiles_in_flight: usize,
    pub stats: SessionStats,
}

impl std::fmt::Display for SessionSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Session [{}] tick={} elapsed={}ms health={} ammo={}{} enemies={} in_flight={} \
             shots={} hits={} kills={} deaths={}",
            self.session,
            self.tick,
            self.elapsed_ms,
            self.health,
            self.ammo,
            if self.reloading { " (reloading)" } else { "" },
            self.enemies_alive,
            self.projectiles_in_flight,
            self.stats.shots_fired,
            self.stats.hits,
            self.stats.kills,
            self.stats.deaths,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ironsight_common::GameConfig;
    use ironsight_input::InputState;

    #[test]
    fn summary_fresh_session() {
        let session = Session::new(GameConfig::default()).unwrap();
        let summary = SessionInspector::summary(&session);
        assert_eq!(summary.tick, 0);
        assert_eq!(summary.health, 100);
        assert_eq!(summary.ammo, 30);
        assert_eq!(summary.enemies_alive, 6);
        assert_eq!(summary.session.len(), 8);
    }

    #[test]
    fn summary_tracks_ticks_and_shots() {
        let mut session = Session::new(GameConfig::default()).unwrap();
        let mut input = InputState::new();
        session.fire();
        session.tick(&mut input);
        session.tick(&mut input);

        let summary = SessionInspector::summary(&session);
        assert_eq!(summary.tick, 2);
        assert_eq!(summary.ammo, 29);
        assert_eq!(summary.stats.shots_fired, 1);
        assert_eq!(summary.elapsed_ms, 33);
    }

    #[test]
    fn summary_display_and_json() {
        let session = Session::new(GameConfig::default()).unwrap();
        let summary = SessionInspector::summary(&session);
        let s = format!("{summary}");
        assert!(s.contains("tick=0"));
        assert!(s.contains("health=100"));

        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["stats"]["kills"], 0);
    }
}
