//! AppService → relay / alert pipeline against mock adapters.

use crate::mock_hw::{MockAlerts, MockHardware, RecordingSink};

use smarthelmet::alert::location::LocationSnippet;
use smarthelmet::app::events::AppEvent;
use smarthelmet::app::service::{ALERT_PREFIX, AppService, STARTUP_NOTICE};
use smarthelmet::config::SystemConfig;
use smarthelmet::safety::{RelayState, SafetyState};

fn quiet_config() -> SystemConfig {
    SystemConfig {
        send_startup_notice: false,
        ..SystemConfig::default()
    }
}

fn run(readings: &[u16]) -> (AppService, MockHardware, MockAlerts, RecordingSink) {
    let mut app = AppService::new(quiet_config());
    let mut hw = MockHardware::new(readings);
    let mut alerts = MockAlerts::new();
    let mut sink = RecordingSink::new();
    app.start(&mut hw, &mut alerts, &mut sink);
    for _ in readings {
        app.tick(&mut hw, &mut alerts, &mut sink);
    }
    (app, hw, alerts, sink)
}

// ── Startup ───────────────────────────────────────────────────

#[test]
fn start_forces_relay_open_before_first_reading() {
    let mut app = AppService::new(quiet_config());
    let mut hw = MockHardware::new(&[]);
    let mut alerts = MockAlerts::new();
    let mut sink = RecordingSink::new();

    app.start(&mut hw, &mut alerts, &mut sink);

    assert_eq!(hw.relay_calls, vec![RelayState::Disengaged]);
    assert_eq!(app.state(), SafetyState::Unsafe);
    assert!(!app.alert_sent());
    assert!(alerts.sent.is_empty());
    assert!(matches!(
        sink.events.first(),
        Some(AppEvent::Started { threshold: 300 })
    ));
}

#[test]
fn startup_notice_is_sent_once_and_does_not_latch() {
    let mut app = AppService::new(SystemConfig::default());
    let mut hw = MockHardware::new(&[500]);
    let mut alerts = MockAlerts::new();
    let mut sink = RecordingSink::new();

    app.start(&mut hw, &mut alerts, &mut sink);
    assert_eq!(alerts.sent, vec![STARTUP_NOTICE.to_string()]);
    assert_eq!(alerts.locate_calls, 0);
    assert!(!app.alert_sent());

    // An unsafe first reading still raises its own alert.
    app.tick(&mut hw, &mut alerts, &mut sink);
    assert_eq!(alerts.sent.len(), 2);
    assert_eq!(alerts.alerts().len(), 1);
}

// ── Threshold + latch scenarios ───────────────────────────────

#[test]
fn single_episode_raises_one_alert() {
    let (app, hw, alerts, _) = run(&[100, 320, 310, 280]);

    assert_eq!(
        hw.relay_calls,
        vec![
            RelayState::Disengaged, // start
            RelayState::Engaged,
            RelayState::Disengaged,
            RelayState::Disengaged,
            RelayState::Engaged,
        ]
    );
    assert_eq!(alerts.alerts().len(), 1);
    assert_eq!(alerts.locate_calls, 1);
    assert_eq!(app.alerts_sent(), 1);
    assert_eq!(app.state(), SafetyState::Safe);
    assert!(!app.alert_sent());
}

#[test]
fn each_unsafe_episode_alerts_again() {
    let (app, _, alerts, _) = run(&[320, 150, 330]);
    assert_eq!(alerts.alerts().len(), 2);
    assert_eq!(app.alerts_sent(), 2);
    assert!(app.alert_sent());
}

#[test]
fn threshold_value_itself_is_safe() {
    let (app, hw, alerts, _) = run(&[300]);
    assert_eq!(hw.last_relay_call(), Some(RelayState::Engaged));
    assert_eq!(app.state(), SafetyState::Safe);
    assert!(alerts.sent.is_empty());
}

#[test]
fn one_above_threshold_is_unsafe() {
    let (app, hw, alerts, _) = run(&[301]);
    assert_eq!(hw.last_relay_call(), Some(RelayState::Disengaged));
    assert_eq!(app.state(), SafetyState::Unsafe);
    assert_eq!(alerts.alerts().len(), 1);
}

#[test]
fn long_unsafe_run_alerts_only_once() {
    let readings = [900u16; 25];
    let (app, _, alerts, _) = run(&readings);
    assert_eq!(alerts.alerts().len(), 1);
    assert_eq!(app.cycle_count(), 25);
}

#[test]
fn alert_body_carries_location_snippet() {
    let mut app = AppService::new(quiet_config());
    let mut hw = MockHardware::new(&[450]);
    let mut alerts = MockAlerts::with_location(LocationSnippet::SignalWeak);
    let mut sink = RecordingSink::new();

    app.start(&mut hw, &mut alerts, &mut sink);
    app.tick(&mut hw, &mut alerts, &mut sink);

    assert_eq!(
        alerts.sent,
        vec![format!("{}GPS Signal Weak", ALERT_PREFIX)]
    );
    assert!(sink.events.iter().any(|e| matches!(
        e,
        AppEvent::AlertSent {
            location: LocationSnippet::SignalWeak
        }
    )));
}

// ── Relay before alert ────────────────────────────────────────

#[test]
fn relay_is_written_before_alert_work() {
    let mut app = AppService::new(quiet_config());
    let mut hw = MockHardware::new(&[100, 700]);
    let mut alerts = MockAlerts::new();
    let mut sink = RecordingSink::new();
    app.start(&mut hw, &mut alerts, &mut sink);

    app.tick(&mut hw, &mut alerts, &mut sink);
    let decision = app.tick(&mut hw, &mut alerts, &mut sink);

    assert!(decision.raise_alert);
    // Reading (relay already applied) is reported before the alert.
    let reading_at = sink
        .events
        .iter()
        .rposition(|e| matches!(e, AppEvent::Reading(d) if d.reading == 700))
        .unwrap();
    let alert_at = sink
        .events
        .iter()
        .position(|e| matches!(e, AppEvent::AlertSent { .. }))
        .unwrap();
    assert!(reading_at < alert_at);
    assert_eq!(hw.last_relay_call(), Some(RelayState::Disengaged));
}

// ── Faults ────────────────────────────────────────────────────

#[test]
fn sensor_fault_is_treated_as_unsafe() {
    let mut app = AppService::new(quiet_config());
    let mut hw = MockHardware::scripted(vec![Some(100), None]);
    let mut alerts = MockAlerts::new();
    let mut sink = RecordingSink::new();
    app.start(&mut hw, &mut alerts, &mut sink);

    app.tick(&mut hw, &mut alerts, &mut sink);
    assert_eq!(app.relay(), RelayState::Engaged);

    let decision = app.tick(&mut hw, &mut alerts, &mut sink);
    assert_eq!(decision.reading, smarthelmet::pins::ADC_FULL_SCALE);
    assert_eq!(decision.relay, RelayState::Disengaged);
    assert_eq!(hw.last_relay_call(), Some(RelayState::Disengaged));
    assert_eq!(app.sensor_faults(), 1);
    assert_eq!(alerts.alerts().len(), 1);
    assert_eq!(sink.count(|e| matches!(e, AppEvent::SensorFault(_))), 1);
}

#[test]
fn relay_fault_is_reported_and_loop_continues() {
    let mut app = AppService::new(quiet_config());
    let mut hw = MockHardware::new(&[100, 120]);
    hw.fail_relay = true;
    let mut alerts = MockAlerts::new();
    let mut sink = RecordingSink::new();
    app.start(&mut hw, &mut alerts, &mut sink);

    app.tick(&mut hw, &mut alerts, &mut sink);
    app.tick(&mut hw, &mut alerts, &mut sink);

    assert_eq!(app.cycle_count(), 2);
    assert_eq!(sink.count(|e| matches!(e, AppEvent::RelayFault(_))), 3);
    let metrics = app.build_metrics(0);
    assert_eq!(metrics.relay_faults, 3);
}

// ── Diagnostic stream ─────────────────────────────────────────

#[test]
fn every_cycle_emits_one_reading_event() {
    let (_, _, _, sink) = run(&[10, 20, 400, 30]);
    assert_eq!(sink.count(|e| matches!(e, AppEvent::Reading(_))), 4);
    // Unsafe → Safe, Safe → Unsafe, Unsafe → Safe
    assert_eq!(sink.count(|e| matches!(e, AppEvent::StateChanged { .. })), 3);
}

#[test]
fn heartbeat_metrics_reflect_counters() {
    let config = SystemConfig {
        heartbeat_interval_cycles: 2,
        ..quiet_config()
    };
    let mut app = AppService::new(config);
    let mut hw = MockHardware::new(&[400, 100]);
    let mut alerts = MockAlerts::new();
    let mut sink = RecordingSink::new();
    app.start(&mut hw, &mut alerts, &mut sink);

    app.tick(&mut hw, &mut alerts, &mut sink);
    assert!(!app.heartbeat_due());
    app.tick(&mut hw, &mut alerts, &mut sink);
    assert!(app.heartbeat_due());

    let m = app.build_metrics(42);
    assert_eq!(m.uptime_secs, 42);
    assert_eq!(m.control_cycles, 2);
    assert_eq!(m.alerts_sent, 1);
    assert_eq!(m.sensor_faults, 0);
}
