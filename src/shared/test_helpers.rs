//! Fixtures and in-memory fakes shared by unit and handler tests.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use axum::{extract::Request, middleware::Next, Router};
use chrono::Utc;

use crate::core::error::{AppError, Result};
use crate::features::auth::model::AuthenticatedUser;
use crate::features::auth::models::{NewUser, User};
use crate::features::auth::repositories::{UserRepository, DUPLICATE_USERNAME};
use crate::features::habits::models::Habit;
use crate::features::habits::repositories::HabitRepository;
use crate::features::reports::models::{NewReport, Report, ReportStatus, WasteType};
use crate::features::reports::repositories::ReportRepository;
use crate::modules::gemini::{ChatModel, ChatModelError};
use crate::modules::mail::{MailError, Notifier, OutgoingEmail};
use crate::modules::storage::ObjectStorage;
use crate::modules::vision::{LabelDetector, LabelMatch};

pub fn user_row(id: i64, username: &str, is_staff: bool) -> User {
    User {
        id,
        username: username.to_string(),
        email: Some(format!("{}@example.com", username)),
        password_hash: "$argon2id$v=19$m=19456,t=2,p=1$c2FsdHNhbHQ$aGFzaA".to_string(),
        is_staff,
        is_superuser: false,
        is_active: true,
        date_joined: Utc::now(),
    }
}

pub fn citizen_user() -> AuthenticatedUser {
    AuthenticatedUser {
        user_id: 1,
        username: "citizen".to_string(),
        is_staff: false,
        is_superuser: false,
    }
}

pub fn staff_user() -> AuthenticatedUser {
    AuthenticatedUser {
        user_id: 2,
        username: "inspector".to_string(),
        is_staff: true,
        is_superuser: false,
    }
}

pub fn superuser() -> AuthenticatedUser {
    AuthenticatedUser {
        user_id: 3,
        username: "root".to_string(),
        is_staff: false,
        is_superuser: true,
    }
}

/// Inject `user` the way the auth middleware would
pub fn with_user(router: Router, user: AuthenticatedUser) -> Router {
    router.layer(axum::middleware::from_fn(
        move |mut request: Request, next: Next| {
            let user = user.clone();
            async move {
                request.extensions_mut().insert(user);
                next.run(request).await
            }
        },
    ))
}

#[derive(Default)]
pub struct InMemoryUserRepository {
    users: Mutex<Vec<User>>,
}

impl InMemoryUserRepository {
    pub fn insert(&self, user: User) {
        self.users.lock().unwrap().push(user);
    }

    pub fn set_active(&self, id: i64, active: bool) {
        self.update(id, |user| user.is_active = active);
    }

    pub fn set_staff(&self, id: i64, staff: bool) {
        self.update(id, |user| user.is_staff = staff);
    }

    pub fn remove(&self, id: i64) {
        self.users.lock().unwrap().retain(|user| user.id != id);
    }

    fn update(&self, id: i64, change: impl FnOnce(&mut User)) {
        let mut users = self.users.lock().unwrap();
        let user = users.iter_mut().find(|user| user.id == id).unwrap();
        change(user);
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: &NewUser) -> Result<User> {
        let mut users = self.users.lock().unwrap();
        if users.iter().any(|u| u.username == user.username) {
            return Err(AppError::Conflict(DUPLICATE_USERNAME.to_string()));
        }
        let created = User {
            id: users.iter().map(|u| u.id).max().unwrap_or(0) + 1,
            username: user.username.clone(),
            email: user.email.clone(),
            password_hash: user.password_hash.clone(),
            is_staff: false,
            is_superuser: false,
            is_active: true,
            date_joined: Utc::now(),
        };
        users.push(created.clone());
        Ok(created)
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>> {
        let users = self.users.lock().unwrap();
        Ok(users.iter().find(|u| u.username == username).cloned())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>> {
        let users = self.users.lock().unwrap();
        Ok(users.iter().find(|u| u.id == id).cloned())
    }
}

/// Rows get strictly increasing `created_at` so ordering is deterministic
#[derive(Default)]
pub struct InMemoryHabitRepository {
    habits: Mutex<Vec<Habit>>,
}

impl InMemoryHabitRepository {
    pub fn len(&self) -> usize {
        self.habits.lock().unwrap().len()
    }
}

#[async_trait]
impl HabitRepository for InMemoryHabitRepository {
    async fn list_for_user(&self, user_id: i64) -> Result<Vec<Habit>> {
        let mut habits: Vec<Habit> = self
            .habits
            .lock()
            .unwrap()
            .iter()
            .filter(|h| h.user_id == user_id)
            .cloned()
            .collect();
        habits.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(habits)
    }

    async fn create(&self, user_id: i64, name: &str) -> Result<Habit> {
        let mut habits = self.habits.lock().unwrap();
        let id = habits.iter().map(|h| h.id).max().unwrap_or(0) + 1;
        let habit = Habit {
            id,
            user_id,
            name: name.to_string(),
            created_at: Utc::now() + chrono::Duration::milliseconds(id),
        };
        habits.push(habit.clone());
        Ok(habit)
    }

    async fn delete(&self, user_id: i64, id: i64) -> Result<bool> {
        let mut habits = self.habits.lock().unwrap();
        let before = habits.len();
        habits.retain(|h| !(h.id == id && h.user_id == user_id));
        Ok(habits.len() != before)
    }
}

#[derive(Default)]
pub struct InMemoryReportRepository {
    reports: Mutex<Vec<Report>>,
}

impl InMemoryReportRepository {
    pub fn get(&self, id: i64) -> Option<Report> {
        self.reports
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.id == id)
            .cloned()
    }

    pub fn len(&self) -> usize {
        self.reports.lock().unwrap().len()
    }
}

#[async_trait]
impl ReportRepository for InMemoryReportRepository {
    async fn insert(&self, report: &NewReport) -> Result<Report> {
        let mut reports = self.reports.lock().unwrap();
        let now = Utc::now();
        let created = Report {
            id: reports.len() as i64 + 1,
            user_id: report.user_id,
            username: format!("user{}", report.user_id),
            email: None,
            description: report.description.clone(),
            severity: report.severity,
            location_lat: report.location_lat,
            location_lng: report.location_lng,
            address: report.address.clone(),
            image_key: report.image_key.clone(),
            status: ReportStatus::Pending,
            waste_type: report.waste_type,
            confidence: 0.0,
            is_verified_garbage: false,
            is_verified_food: false,
            preparation_time: report.preparation_time,
            uploaded_at: now,
            updated_at: now,
        };
        reports.push(created.clone());
        Ok(created)
    }

    async fn record_verification(
        &self,
        id: i64,
        waste_type: WasteType,
        verdict: LabelMatch,
    ) -> Result<Report> {
        let mut reports = self.reports.lock().unwrap();
        let report = reports
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| AppError::NotFound(format!("Report {} not found", id)))?;
        match waste_type {
            WasteType::General => report.is_verified_garbage = verdict.matched,
            WasteType::FoodWaste => report.is_verified_food = verdict.matched,
        }
        report.confidence = verdict.score;
        touch(report);
        Ok(report.clone())
    }

    async fn list_all(&self) -> Result<Vec<Report>> {
        let mut reports = self.reports.lock().unwrap().clone();
        reports.sort_by(|a, b| b.uploaded_at.cmp(&a.uploaded_at).then(b.id.cmp(&a.id)));
        Ok(reports)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Report>> {
        Ok(self.get(id))
    }

    async fn update_status(&self, id: i64, status: ReportStatus) -> Result<Option<Report>> {
        let mut reports = self.reports.lock().unwrap();
        Ok(reports.iter_mut().find(|r| r.id == id).map(|report| {
            report.status = status;
            touch(report);
            report.clone()
        }))
    }
}

/// Move `updated_at` strictly forward, as `NOW()` does across statements
fn touch(report: &mut Report) {
    report.updated_at = Utc::now().max(report.updated_at + chrono::Duration::microseconds(1));
}

#[derive(Default)]
pub struct FakeStorage {
    keys: Mutex<Vec<String>>,
    unavailable: AtomicBool,
    presign_fails: AtomicBool,
}

impl FakeStorage {
    /// Uploads fail
    pub fn unavailable() -> Self {
        Self {
            unavailable: AtomicBool::new(true),
            ..Self::default()
        }
    }

    /// Uploads succeed but links cannot be signed
    pub fn without_presigning() -> Self {
        Self {
            presign_fails: AtomicBool::new(true),
            ..Self::default()
        }
    }
}

#[async_trait]
impl ObjectStorage for FakeStorage {
    async fn upload(&self, key: &str, _data: &[u8], _content_type: &str) -> Result<()> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(AppError::ExternalServiceError(
                "Failed to upload file: connection refused".to_string(),
            ));
        }
        self.keys.lock().unwrap().push(key.to_string());
        Ok(())
    }

    async fn presigned_url(&self, key: &str) -> Result<String> {
        if self.presign_fails.load(Ordering::SeqCst) {
            return Err(AppError::ExternalServiceError(
                "Failed to generate presigned URL".to_string(),
            ));
        }
        Ok(format!("http://storage.test/{}", key))
    }
}

pub struct FakeLabelDetector {
    verdict: LabelMatch,
    calls: AtomicUsize,
}

impl FakeLabelDetector {
    pub fn new(verdict: LabelMatch) -> Self {
        Self {
            verdict,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl LabelDetector for FakeLabelDetector {
    async fn detect(&self, _image: &[u8], _targets: &[&str]) -> LabelMatch {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.verdict
    }
}

#[derive(Default)]
pub struct RecordingNotifier {
    sent: Mutex<Vec<OutgoingEmail>>,
    fail_next: AtomicBool,
}

impl RecordingNotifier {
    pub fn sent(&self) -> Vec<OutgoingEmail> {
        self.sent.lock().unwrap().clone()
    }

    pub fn fail_next(&self) {
        self.fail_next.store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn send(&self, email: OutgoingEmail) -> std::result::Result<(), MailError> {
        if self.fail_next.swap(false, Ordering::SeqCst) {
            return Err(MailError::Build("relay unavailable".to_string()));
        }
        self.sent.lock().unwrap().push(email);
        Ok(())
    }
}

/// Replies with a canned text, or fails when none is set
#[derive(Default)]
pub struct FakeChatModel {
    reply: Option<String>,
    prompts: Mutex<Vec<String>>,
}

impl FakeChatModel {
    pub fn replying(reply: &str) -> Self {
        Self {
            reply: Some(reply.to_string()),
            prompts: Mutex::default(),
        }
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChatModel for FakeChatModel {
    async fn generate(&self, prompt: &str) -> std::result::Result<String, ChatModelError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.reply.clone().ok_or(ChatModelError::EmptyResponse)
    }
}
