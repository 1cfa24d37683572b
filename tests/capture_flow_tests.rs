use rink_tracker::{
    capture::{CaptureMode, GameSession, WizardError, WizardStep},
    error::AppError,
    models::{ActionType, Player, RinkPoint, Side},
    roster::RosterRulesTable,
    stats::{get_player_stats, get_team_stats},
    storage::{
        FileRecoveryStore, GameRepository, JsonGameStore, JsonTeamStore, RecoveryStore,
        TeamRepository,
    },
    testing_utils::TestDataBuilder,
};
use tempfile::tempdir;

fn record(
    session: &mut GameSession,
    action: ActionType,
    side: Side,
    period: u32,
    scorer: usize,
    assists: &[usize],
) -> u32 {
    session.click_rink(RinkPoint::new(30.0, 70.0)).unwrap();
    session.select_action(action, side, period, 120).unwrap();
    let players = session.player_choices();
    session.select_player(players[scorer].clone()).unwrap();
    if action == ActionType::Goal {
        let assists: Vec<Player> = assists.iter().map(|&i| players[i].clone()).collect();
        session.select_assists(assists).unwrap();
    }
    session.confirm_capture().unwrap().unwrap()
}

/// A full game: capture, autosave, crash, restore, finalize, read back.
#[tokio::test]
async fn test_game_survives_restart_and_finalizes_to_disk() {
    let dir = tempdir().unwrap();
    let recovery = FileRecoveryStore::in_dir(dir.path());
    let games = JsonGameStore::new(dir.path().join("games"));

    let setup = TestDataBuilder::setup("home", "away");
    let mut session = GameSession::start(setup, &RosterRulesTable::default(), true).unwrap();

    record(&mut session, ActionType::Goal, Side::Home, 1, 5, &[6, 7]);
    record(&mut session, ActionType::Shot, Side::Away, 1, 4, &[]);
    assert!(session.autosave(&recovery).await.unwrap());

    // Simulated restart: only the recovery file is left
    drop(session);
    let snapshot = recovery.load().await.unwrap().unwrap();
    let mut session = GameSession::restore(snapshot, true);
    assert_eq!(session.log().len(), 2);
    assert_eq!(session.score().home.goals, 1);
    assert_eq!(session.score().away.shots, 1);

    record(&mut session, ActionType::Hit, Side::Home, 2, 3, &[]);
    let game = session.finalize(&games, &recovery).await.unwrap();

    assert!(recovery.load().await.unwrap().is_none());
    assert_eq!(game.id.len(), 32);
    let stored = games.get(&game.id).await.unwrap();
    assert_eq!(stored.actions.len(), 3);
    assert_eq!(stored.score, game.score);
    assert_eq!(stored.actions[0].assists.len(), 2);
    assert_eq!(games.list_by_team("away").await.unwrap().len(), 1);
    assert!(games.list_by_team("elsewhere").await.unwrap().is_empty());

    let home = stored.teams.home.clone();
    let team_stats = get_team_stats(&home, &[stored.clone()]);
    assert_eq!(team_stats.wins, 1);
    assert_eq!(team_stats.hits, 1);

    let scorer = stored.actions[0].player.clone();
    let scorer_stats = get_player_stats(&[stored], &scorer);
    assert_eq!(scorer_stats.goals, 1);
    assert_eq!(scorer_stats.points, 1);
    assert_eq!(scorer_stats.games_played, 1);
}

#[tokio::test]
async fn test_tied_game_is_not_saved() {
    let dir = tempdir().unwrap();
    let recovery = FileRecoveryStore::in_dir(dir.path());
    let games = JsonGameStore::new(dir.path().join("games"));

    let mut session = GameSession::new(TestDataBuilder::setup("home", "away"), true);
    record(&mut session, ActionType::Goal, Side::Home, 1, 5, &[]);
    record(&mut session, ActionType::Goal, Side::Away, 3, 5, &[]);
    session.save_locally(&recovery).await.unwrap();

    let err = session.finalize(&games, &recovery).await.unwrap_err();
    assert!(matches!(err, AppError::TiedGame { home: 1, away: 1 }));
    assert!(games.list_all().await.unwrap().is_empty());
    assert!(recovery.load().await.unwrap().is_some());

    // The deciding goal in overtime makes the game final
    record(&mut session, ActionType::Goal, Side::Away, 4, 5, &[]);
    let game = session.finalize(&games, &recovery).await.unwrap();
    assert_eq!(game.score.away.goals, 2);
}

#[tokio::test]
async fn test_editing_a_saved_game_updates_in_place() {
    let dir = tempdir().unwrap();
    let recovery = FileRecoveryStore::in_dir(dir.path());
    let games = JsonGameStore::new(dir.path().join("games"));

    let mut session = GameSession::new(TestDataBuilder::setup("home", "away"), true);
    let goal = record(&mut session, ActionType::Goal, Side::Home, 1, 5, &[]);
    record(&mut session, ActionType::Goal, Side::Home, 2, 6, &[]);
    let saved = session.finalize(&games, &recovery).await.unwrap();

    let mut editing = GameSession::from_saved(saved.clone());
    assert!(!editing.autosave_enabled());
    editing.edit_event(goal).unwrap();
    assert_eq!(editing.wizard().mode(), CaptureMode::Edit(goal));
    assert_eq!(editing.wizard().step(), WizardStep::Confirm);
    editing.cancel_capture();
    editing.delete_event(goal).unwrap();
    let updated = editing.persist(&games).await.unwrap();

    let all = games.list_all().await.unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].id, saved.id);
    assert_eq!(all[0].score.home.goals, 1);
    assert_eq!(updated.actions.len(), 1);
}

/// Changing an event's type and team goes back through the wizard and rescores
/// both sides from the full action list.
#[test]
fn test_edit_changes_type_and_team() {
    let mut session = GameSession::new(TestDataBuilder::setup("home", "away"), true);
    let goal = record(&mut session, ActionType::Goal, Side::Home, 1, 5, &[6]);
    record(&mut session, ActionType::Shot, Side::Home, 1, 4, &[]);
    assert_eq!(session.score().home.goals, 1);
    assert_eq!(session.score().home.shots, 2);

    session.edit_event(goal).unwrap();
    assert_eq!(session.back().unwrap(), WizardStep::AssistSelect);
    session.back_to(WizardStep::ActionSelect).unwrap();
    assert!(session.wizard().draft().player.is_none());
    assert!(session.wizard().draft().assists.is_none());

    session.select_action(ActionType::Turnover, Side::Away, 2, 45).unwrap();
    let away_player = session.player_choices()[3].clone();
    assert_eq!(away_player.team_id, "away");
    session.select_player(away_player.clone()).unwrap();
    assert_eq!(session.wizard().step(), WizardStep::Confirm);
    assert_eq!(session.confirm_capture().unwrap(), Some(goal));

    let edited = session.log().get(goal).unwrap();
    assert_eq!(edited.action_type, ActionType::Turnover);
    assert_eq!(edited.player.id, away_player.id);
    assert!(edited.assists.is_empty());

    assert_eq!(session.score().home.goals, 0);
    assert_eq!(session.score().home.shots, 1);
    assert_eq!(session.score().away.turnovers, 1);
    assert!(session.log().is_consistent());
    assert!(session.is_dirty());
}

/// Going back from confirm on a goal drops the player and the assists, and the
/// assist step has to be passed again.
#[test]
fn test_back_from_confirm_recollects_assists() {
    let mut session = GameSession::new(TestDataBuilder::setup("home", "away"), true);
    session.click_rink(RinkPoint::new(40.0, 40.0)).unwrap();
    session.select_action(ActionType::Goal, Side::Home, 2, 125).unwrap();
    let players = session.player_choices();
    session.select_player(players[5].clone()).unwrap();
    session.select_assists(vec![players[6].clone()]).unwrap();
    assert_eq!(session.wizard().step(), WizardStep::Confirm);

    session.back_to(WizardStep::PlayerSelect).unwrap();
    assert!(session.wizard().draft().player.is_none());
    assert!(session.wizard().draft().assists.is_none());
    assert_eq!(session.confirm_capture().unwrap(), None);

    session.select_player(players[7].clone()).unwrap();
    assert_eq!(session.wizard().step(), WizardStep::AssistSelect);
    session.select_assists(Vec::new()).unwrap();
    let id = session.confirm_capture().unwrap().unwrap();
    assert_eq!(session.log().get(id).unwrap().player.id, players[7].id);
}

#[test]
fn test_wizard_guards_assists() {
    let mut session = GameSession::new(TestDataBuilder::setup("home", "away"), true);
    session.click_rink(RinkPoint::new(5.0, 5.0)).unwrap();
    session.select_action(ActionType::Goal, Side::Away, 1, 0).unwrap();
    let players = session.player_choices();
    session.select_player(players[4].clone()).unwrap();

    let three = vec![players[5].clone(), players[6].clone(), players[7].clone()];
    assert_eq!(
        session.select_assists(three),
        Err(WizardError::TooManyAssists { count: 3 })
    );
    assert_eq!(
        session.select_assists(vec![players[4].clone()]),
        Err(WizardError::ScorerAssist)
    );
    assert!(matches!(
        session.select_assists(vec![players[5].clone(), players[5].clone()]),
        Err(WizardError::DuplicateAssist { .. })
    ));

    let choices = session.assist_choices();
    session
        .select_assists(vec![choices[0].clone(), choices[1].clone()])
        .unwrap();
    let id = session.confirm_capture().unwrap().unwrap();
    let event = session.log().get(id).unwrap();
    assert!(event.assists[0].is_placeholder());
    assert_eq!(session.wizard().step(), WizardStep::Idle);
}

#[tokio::test]
async fn test_team_store_round_trip_and_free_agents() {
    let dir = tempdir().unwrap();
    let store = JsonTeamStore::new(dir.path().join("teams.json"));

    let mut team = TestDataBuilder::team("draft");
    team.name = "Corona Brasov".to_string();
    let saved = store.save(team).await.unwrap();
    assert_ne!(saved.id, "draft");
    assert!(saved.players.iter().all(|p| p.team_id == saved.id));

    assert!(store.is_name_taken("corona brasov", None).await.unwrap());
    assert!(
        !store
            .is_name_taken("Corona Brasov", Some(saved.id.as_str()))
            .await
            .unwrap()
    );
    assert!(!store.is_jersey_number_available(&saved.id, 1).await.unwrap());
    assert!(store.is_jersey_number_available(&saved.id, 77).await.unwrap());

    let mut duplicate = TestDataBuilder::team("other");
    duplicate.name = "CORONA BRASOV ".to_string();
    assert!(matches!(
        store.save(duplicate).await.unwrap_err(),
        AppError::TeamAlreadyExists { .. }
    ));

    // A fresh store over the same file sees the same data
    let reopened = JsonTeamStore::new(dir.path().join("teams.json"));
    assert_eq!(reopened.get(&saved.id).await.unwrap().name, "Corona Brasov");

    reopened.delete(&saved.id).await.unwrap();
    let teams = reopened.list().await.unwrap();
    assert_eq!(teams.len(), 1);
    assert_eq!(teams[0].id, "free-agent");
    assert_eq!(teams[0].players.len(), saved.players.len());
    assert!(reopened.get(&saved.id).await.unwrap_err().is_not_found());
}
