use std::collections::HashSet;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Barrier, Mutex};
use std::thread;
use std::time::Duration;

use progression_core::{LevelFormula, PlayerId, Skill, SkillKind, SkillProfile};
use runtime::repository::Result;
use runtime::{
    InMemoryProfileRepository, PlayerDataManager, ProfileRepository, RepositoryError,
    RetryPolicy, SaveMetrics, SaveReport, save_with_retry,
};
use tokio::runtime::Handle;

fn formula() -> LevelFormula {
    LevelFormula::new(100.0, 1.25).unwrap()
}

fn no_backoff() -> RetryPolicy {
    RetryPolicy::new(3, Duration::ZERO)
}

/// Fails the first `failures` saves, then delegates to an in-memory store.
/// Saves of players in `always_fail` never succeed.
#[derive(Default)]
struct FlakyRepository {
    inner: InMemoryProfileRepository,
    failures: AtomicU32,
    always_fail: HashSet<PlayerId>,
    save_calls: AtomicU32,
    load_calls: AtomicU32,
    broken_loads: bool,
}

impl FlakyRepository {
    fn failing(times: u32) -> Self {
        Self {
            failures: AtomicU32::new(times),
            ..Self::default()
        }
    }

    fn save_calls(&self) -> u32 {
        self.save_calls.load(Ordering::SeqCst)
    }

    fn load_calls(&self) -> u32 {
        self.load_calls.load(Ordering::SeqCst)
    }
}

impl ProfileRepository for FlakyRepository {
    fn save(&self, player: &PlayerId, profile: &SkillProfile) -> Result<()> {
        self.save_calls.fetch_add(1, Ordering::SeqCst);
        if self.always_fail.contains(player) {
            return Err(RepositoryError::Io(std::io::Error::other("disk full")));
        }
        let remaining = self.failures.load(Ordering::SeqCst);
        if remaining > 0 {
            self.failures.store(remaining - 1, Ordering::SeqCst);
            return Err(RepositoryError::Io(std::io::Error::other("transient")));
        }
        self.inner.save(player, profile)
    }

    fn load(&self, player: &PlayerId) -> Result<Option<SkillProfile>> {
        self.load_calls.fetch_add(1, Ordering::SeqCst);
        if self.broken_loads {
            return Err(RepositoryError::CorruptedData("bad record".into()));
        }
        self.inner.load(player)
    }

    fn exists(&self, player: &PlayerId) -> bool {
        self.inner.exists(player)
    }
}

/// Holds every save until the test sends a release.
struct SlowRepository {
    inner: InMemoryProfileRepository,
    release: Mutex<Receiver<()>>,
}

impl SlowRepository {
    fn new() -> (Self, Sender<()>) {
        let (tx, rx) = mpsc::channel();
        let repo = Self {
            inner: InMemoryProfileRepository::new(),
            release: Mutex::new(rx),
        };
        (repo, tx)
    }
}

impl ProfileRepository for SlowRepository {
    fn save(&self, player: &PlayerId, profile: &SkillProfile) -> Result<()> {
        let _ = self.release.lock().unwrap().recv();
        self.inner.save(player, profile)
    }

    fn load(&self, player: &PlayerId) -> Result<Option<SkillProfile>> {
        self.inner.load(player)
    }

    fn exists(&self, player: &PlayerId) -> bool {
        self.inner.exists(player)
    }
}

fn manager(repository: Arc<dyn ProfileRepository>) -> Arc<PlayerDataManager> {
    Arc::new(PlayerDataManager::new(
        repository,
        formula(),
        no_backoff(),
        Handle::current(),
    ))
}

#[test]
fn retry_recovers_after_two_failures() {
    let repo = FlakyRepository::failing(2);
    let player = PlayerId::new_random();
    let profile = SkillProfile::new(player, formula());
    let metrics = SaveMetrics::new();

    assert!(save_with_retry(&repo, &player, &profile, no_backoff(), &metrics));
    assert_eq!(repo.save_calls(), 3);
    assert!(repo.exists(&player));

    let snapshot = metrics.snapshot();
    assert_eq!((snapshot.saved, snapshot.retried, snapshot.failed), (1, 2, 0));
}

#[test]
fn retry_gives_up_after_max_attempts() {
    let repo = FlakyRepository::failing(u32::MAX);
    let player = PlayerId::new_random();
    let profile = SkillProfile::new(player, formula());
    let metrics = SaveMetrics::new();
    let policy = RetryPolicy::new(5, Duration::ZERO);

    assert!(!save_with_retry(&repo, &player, &profile, policy, &metrics));
    assert_eq!(repo.save_calls(), 5);
    assert!(!repo.exists(&player));
    assert_eq!(metrics.snapshot().failed, 1);
}

#[test]
fn backoff_doubles_from_initial_delay() {
    let policy = RetryPolicy::new(4, Duration::from_millis(100));
    assert_eq!(policy.backoff(0), Duration::from_millis(100));
    assert_eq!(policy.backoff(1), Duration::from_millis(200));
    assert_eq!(policy.backoff(2), Duration::from_millis(400));
}

#[tokio::test]
async fn save_all_reports_partial_failure() {
    let broken = PlayerId::new_random();
    let repo = Arc::new(FlakyRepository {
        always_fail: HashSet::from([broken]),
        ..FlakyRepository::default()
    });
    let manager = manager(repo.clone());

    let healthy = [PlayerId::new_random(), PlayerId::new_random()];
    for player in healthy.iter().copied().chain([broken]) {
        manager.award_experience(player, SkillKind::Mining, 10.0);
    }

    let report = manager.save_all_profiles();
    assert_eq!(report, SaveReport { saved: 2, failed: 1 });
    assert!(healthy.iter().all(|player| repo.exists(player)));
    assert!(!repo.exists(&broken));
    assert!(manager.get_profile(broken).lock().is_new());
}

#[tokio::test]
async fn failed_load_falls_back_to_fresh_profile() {
    let repo = Arc::new(FlakyRepository {
        broken_loads: true,
        ..FlakyRepository::default()
    });
    let manager = manager(repo);
    let player = PlayerId::new_random();

    let cached = manager.get_profile(player);
    let profile = cached.lock();
    assert!(profile.is_new());
    assert!(profile.has_all_skills());
    assert_eq!(profile.total_level(), SkillKind::COUNT as u64);
}

#[tokio::test]
async fn existing_record_is_loaded_once() {
    let repo = Arc::new(FlakyRepository::default());
    let player = PlayerId::new_random();
    let mut stored = SkillProfile::new(player, formula());
    stored
        .get_skill_mut(SkillKind::Farming)
        .unwrap()
        .set_level(9);
    repo.save(&player, &stored).unwrap();

    let manager = manager(repo.clone());
    assert!(!manager.on_join(player));
    assert_eq!(
        manager.get_profile(player).lock().get_skill(SkillKind::Farming).unwrap().level(),
        9
    );
    assert_eq!(repo.load_calls(), 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn racing_first_access_loads_once() {
    let repo = Arc::new(FlakyRepository::default());
    let manager = manager(repo.clone());
    let player = PlayerId::new_random();
    let barrier = Barrier::new(8);

    let profiles: Vec<_> = thread::scope(|scope| {
        let handles: Vec<_> = (0..8)
            .map(|_| {
                scope.spawn(|| {
                    barrier.wait();
                    manager.get_profile(player)
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    assert_eq!(repo.load_calls(), 1);
    assert!(profiles.windows(2).all(|pair| Arc::ptr_eq(&pair[0], &pair[1])));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn concurrent_awards_are_not_lost() {
    let manager = manager(Arc::new(InMemoryProfileRepository::new()));
    let player = PlayerId::new_random();
    const THREADS: usize = 8;
    const AWARDS: usize = 250;

    thread::scope(|scope| {
        for _ in 0..THREADS {
            scope.spawn(|| {
                for _ in 0..AWARDS {
                    manager.award_experience(player, SkillKind::Combat, 1.0);
                }
            });
        }
    });

    let mut expected = Skill::new(SkillKind::Combat, formula());
    for _ in 0..THREADS * AWARDS {
        expected.add_experience(1.0);
    }

    let cached = manager.get_profile(player);
    let profile = cached.lock();
    let combat = profile.get_skill(SkillKind::Combat).unwrap();
    assert_eq!(combat.level(), expected.level());
    assert_eq!(combat.experience(), expected.experience());
}

#[tokio::test]
async fn background_save_persists_current_state() {
    let repo = Arc::new(InMemoryProfileRepository::new());
    let manager = manager(repo.clone());
    let player = PlayerId::new_random();

    manager.award_experience(player, SkillKind::Woodcutting, 150.0);
    let pending = manager.save_profile(player).expect("player is cached");
    assert!(pending.await.unwrap());

    let stored = repo.load(&player).unwrap().unwrap();
    assert_eq!(stored.get_skill(SkillKind::Woodcutting).unwrap().level(), 2);
    assert!(!manager.get_profile(player).lock().is_new());
    assert_eq!(manager.metrics().saved, 1);
}

#[tokio::test]
async fn quit_saves_and_evicts() {
    let repo = Arc::new(InMemoryProfileRepository::new());
    let manager = manager(repo.clone());
    let player = PlayerId::new_random();

    assert!(manager.on_join(player));
    manager.award_experience(player, SkillKind::Trading, 42.0);

    let pending = manager.on_quit(player).expect("save scheduled");
    assert!(pending.await.unwrap());
    assert!(!manager.is_cached(player));

    let stored = repo.load(&player).unwrap().unwrap();
    assert_eq!(stored.get_skill(SkillKind::Trading).unwrap().experience(), 42.0);

    assert!(!manager.on_join(player));
}

#[tokio::test]
async fn quit_keeps_profile_cached_until_saved() {
    let (repo, release) = SlowRepository::new();
    let repo = Arc::new(repo);
    let manager = manager(repo.clone());
    let player = PlayerId::new_random();

    manager.on_join(player);
    manager.award_experience(player, SkillKind::Mining, 10.0);
    let pending = manager.on_quit(player).expect("save scheduled");
    assert!(manager.is_cached(player));

    release.send(()).unwrap();
    assert!(pending.await.unwrap());
    assert!(!manager.is_cached(player));
    assert!(repo.exists(&player));
}

#[tokio::test]
async fn rejoin_during_quit_save_keeps_progress() {
    let (repo, release) = SlowRepository::new();
    let repo = Arc::new(repo);
    let manager = manager(repo.clone());
    let player = PlayerId::new_random();

    manager.on_join(player);
    manager.award_experience(player, SkillKind::Trading, 42.0);
    let pending = manager.on_quit(player).expect("save scheduled");

    // Back before the quit save lands.
    manager.on_join(player);
    manager.award_experience(player, SkillKind::Trading, 8.0);

    release.send(()).unwrap();
    assert!(pending.await.unwrap());
    assert!(manager.is_cached(player));

    let cached = manager.get_profile(player).snapshot();
    assert_eq!(cached.get_skill(SkillKind::Trading).unwrap().experience(), 50.0);

    release.send(()).unwrap();
    assert!(manager.save_profile_sync(player));
    let stored = repo.load(&player).unwrap().unwrap();
    assert_eq!(stored.get_skill(SkillKind::Trading).unwrap().experience(), 50.0);
}

#[tokio::test]
async fn quit_of_unknown_player_schedules_nothing() {
    let manager = manager(Arc::new(InMemoryProfileRepository::new()));
    assert!(manager.on_quit(PlayerId::new_random()).is_none());
    assert!(!manager.remove_from_cache(PlayerId::new_random()));
}

#[tokio::test]
async fn autosave_flushes_cached_profiles() {
    let repo = Arc::new(InMemoryProfileRepository::new());
    let manager = manager(repo.clone());
    let player = PlayerId::new_random();
    manager.award_experience(player, SkillKind::Fishing, 5.0);

    let autosave = manager.spawn_autosave(Duration::from_millis(10));

    let mut saved = false;
    for _ in 0..200 {
        tokio::time::sleep(Duration::from_millis(10)).await;
        if repo.exists(&player) {
            saved = true;
            break;
        }
    }
    autosave.abort();

    assert!(saved, "autosave never wrote the profile");
}
