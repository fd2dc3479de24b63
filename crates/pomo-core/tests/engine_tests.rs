mod common;

use std::{future, time::Duration};

use common::{create_test_environment, open_config};
use pomo_core::{current_interval, Callbacks, Category, IntervalState, PomodoroError};
use tokio::sync::mpsc;

#[tokio::test(start_paused = true)]
async fn test_rotation_survives_reopening_the_database() {
    let (_temp_dir, db_path) = create_test_environment();
    let mut categories = Vec::new();

    {
        let config = open_config(&db_path, [2, 1, 3]).await;
        for _ in 0..5 {
            let interval = current_interval(&config).await.unwrap();
            categories.push(interval.category);
            interval
                .start(&config, future::pending(), Callbacks::new())
                .await
                .unwrap();
        }
    }

    let config = open_config(&db_path, [2, 1, 3]).await;
    for _ in 0..5 {
        let interval = current_interval(&config).await.unwrap();
        categories.push(interval.category);
        interval
            .start(&config, future::pending(), Callbacks::new())
            .await
            .unwrap();
    }

    use Category::{LongBreak as L, Pomodoro as P, ShortBreak as S};
    assert_eq!(categories, [P, S, P, S, P, S, P, L, P, S]);

    let long = config.repository().by_id(8).unwrap();
    assert_eq!(long.planned_duration, Duration::from_secs(3));
    assert_eq!(long.actual_duration, Duration::from_secs(3));
    assert_eq!(long.state, IntervalState::Done);
}

#[tokio::test(start_paused = true)]
async fn test_pause_from_another_connection_stops_the_loop() {
    let (_temp_dir, db_path) = create_test_environment();
    let runner = open_config(&db_path, [60, 5, 15]).await;
    let other = open_config(&db_path, [60, 5, 15]).await;

    let interval = current_interval(&runner).await.unwrap();
    let (ticks_tx, mut ticks_rx) = mpsc::unbounded_channel();
    let callbacks = Callbacks::new().on_tick(move |i| {
        let _ = ticks_tx.send(i.actual_duration);
        Ok(())
    });

    let background = tokio::spawn(async move {
        interval
            .start(&runner, future::pending(), callbacks)
            .await
    });

    while let Some(elapsed) = ticks_rx.recv().await {
        if elapsed == Duration::from_secs(5) {
            break;
        }
    }

    let seen_elsewhere = current_interval(&other).await.unwrap();
    assert_eq!(seen_elsewhere.state, IntervalState::Running);
    seen_elsewhere.pause(&other).await.unwrap();
    background.await.unwrap().unwrap();

    let paused = other.repository().last().unwrap();
    assert_eq!(paused.state, IntervalState::Paused);
    assert_eq!(paused.actual_duration, Duration::from_secs(5));
}

#[tokio::test(start_paused = true)]
async fn test_stored_unknown_state_is_reported() {
    let (_temp_dir, db_path) = create_test_environment();
    let config = open_config(&db_path, [2, 1, 3]).await;
    let interval = current_interval(&config).await.unwrap();

    let conn = rusqlite::Connection::open(&db_path).unwrap();
    conn.execute("UPDATE interval SET state = 9 WHERE id = ?1", [interval.id as i64])
        .unwrap();
    drop(conn);

    assert!(matches!(
        config.repository().by_id(interval.id),
        Err(PomodoroError::InvalidState { code: 9 })
    ));
    assert!(matches!(
        current_interval(&config).await,
        Err(PomodoroError::InvalidState { code: 9 })
    ));
}
