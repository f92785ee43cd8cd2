//! In-memory ports for service tests

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use linkify_common::auth::{hash_password, JwtService};
use linkify_core::analytics::Window;
use linkify_core::entitlements::Entitlements;
use linkify_core::entities::{
    AnalyticsEvent, Appearance, ButtonStyle, EventKind, Form, FormSubmission, Layout, Link,
    Section, Settings, SocialLink, Subscription, SubscriptionStatus, Testimonial, Theme, User,
};
use linkify_core::error::DomainError;
use linkify_core::ordering::{next_index, plan_reorder};
use linkify_core::traits::{
    AnalyticsRepository, AppearanceRepository, BillingProvider, CheckoutRequest, FormRepository,
    ImageStore, LinkRepository, RepoResult, SectionRepository, SocialLinkRepository,
    SubscriptionRepository, TestimonialRepository, UploadSignature, UserRepository,
};
use linkify_core::{Snowflake, SnowflakeGenerator};

use super::context::{ServiceContext, ServiceContextBuilder, ServiceSettings};

pub const WEBHOOK_SECRET: &str = "whsec_test";
pub const PASSWORD: &str = "correct-horse-42";

#[derive(Default)]
pub struct Tables {
    pub users: Vec<(User, String)>,
    pub appearances: HashMap<Snowflake, Appearance>,
    pub sections: Vec<Section>,
    pub links: Vec<Link>,
    pub social_links: Vec<SocialLink>,
    pub testimonials: Vec<Testimonial>,
    pub forms: Vec<Form>,
    pub submissions: Vec<FormSubmission>,
    pub events: Vec<AnalyticsEvent>,
    pub subscriptions: Vec<Subscription>,
}

/// Rows that carry a per-parent `index`
trait Ordered {
    fn row_id(&self) -> Snowflake;
    fn position(&self) -> i32;
    fn set_position(&mut self, index: i32);
}

macro_rules! ordered {
    ($($ty:ty),+) => {
        $(impl Ordered for $ty {
            fn row_id(&self) -> Snowflake {
                self.id
            }

            fn position(&self) -> i32 {
                self.index
            }

            fn set_position(&mut self, index: i32) {
                self.index = index;
            }
        })+
    };
}

ordered!(Section, Link, SocialLink, Testimonial);

fn remove_and_compact<T: Ordered>(rows: &mut Vec<T>, id: Snowflake, same_parent: impl Fn(&T) -> bool) -> bool {
    let Some(position) = rows.iter().position(|row| row.row_id() == id) else {
        return false;
    };
    let gap = rows.remove(position).position();

    for row in rows.iter_mut() {
        if same_parent(row) && row.position() > gap {
            row.set_position(row.position() - 1);
        }
    }
    true
}

/// Push `row` after its siblings; returns the index it was given
fn append<T: Ordered + Clone>(rows: &mut Vec<T>, row: &T, same_parent: impl Fn(&T) -> bool) -> RepoResult<i32> {
    let index = next_index(rows.iter().filter(|r| same_parent(r)).count() as i64)?;
    let mut row = row.clone();
    row.set_position(index);
    rows.push(row);
    Ok(index)
}

fn reorder_rows<T: Ordered>(rows: &mut [T], same_parent: impl Fn(&T) -> bool, requested: &[Snowflake]) -> RepoResult<()> {
    let mut current: Vec<(i32, Snowflake)> =
        rows.iter().filter(|row| same_parent(row)).map(|row| (row.position(), row.row_id())).collect();
    current.sort();
    let current: Vec<Snowflake> = current.into_iter().map(|(_, id)| id).collect();

    for (id, index) in plan_reorder(&current, requested)? {
        if let Some(row) = rows.iter_mut().find(|row| row.row_id() == id) {
            row.set_position(index);
        }
    }
    Ok(())
}

fn sorted_by_index<T: Ordered>(rows: impl Iterator<Item = T>) -> Vec<T> {
    let mut rows: Vec<T> = rows.collect();
    rows.sort_by_key(|row| row.position());
    rows
}

fn in_window(at: DateTime<Utc>, window: Window) -> bool {
    window.contains(at)
}

/// One shared set of tables behind every repository port
#[derive(Clone, Default)]
pub struct MemoryStore {
    tables: Arc<Mutex<Tables>>,
}

impl MemoryStore {
    pub fn tables(&self) -> MutexGuard<'_, Tables> {
        self.tables.lock().unwrap()
    }
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<User>> {
        Ok(self.tables().users.iter().find(|(u, _)| u.id == id).map(|(u, _)| u.clone()))
    }

    async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>> {
        Ok(self
            .tables()
            .users
            .iter()
            .find(|(u, _)| u.email.eq_ignore_ascii_case(email))
            .map(|(u, _)| u.clone()))
    }

    async fn find_by_username(&self, username: &str) -> RepoResult<Option<User>> {
        Ok(self.tables().users.iter().find(|(u, _)| u.username == username).map(|(u, _)| u.clone()))
    }

    async fn email_exists(&self, email: &str) -> RepoResult<bool> {
        Ok(self.find_by_email(email).await?.is_some())
    }

    async fn username_exists(&self, username: &str) -> RepoResult<bool> {
        Ok(self.find_by_username(username).await?.is_some())
    }

    async fn create(&self, user: &User, password_hash: &str, appearance: &Appearance) -> RepoResult<()> {
        let mut tables = self.tables();
        if tables.users.iter().any(|(u, _)| u.email.eq_ignore_ascii_case(&user.email)) {
            return Err(DomainError::EmailAlreadyExists);
        }
        if tables.users.iter().any(|(u, _)| u.username == user.username) {
            return Err(DomainError::UsernameTaken(user.username.clone()));
        }
        tables.users.push((user.clone(), password_hash.to_string()));
        tables.appearances.insert(user.id, appearance.clone());
        Ok(())
    }

    async fn update(&self, user: &User) -> RepoResult<()> {
        let mut tables = self.tables();
        if tables.users.iter().any(|(u, _)| u.id != user.id && u.username == user.username) {
            return Err(DomainError::UsernameTaken(user.username.clone()));
        }
        let row = tables
            .users
            .iter_mut()
            .find(|(u, _)| u.id == user.id)
            .ok_or(DomainError::UserNotFound(user.id))?;
        row.0 = user.clone();
        Ok(())
    }

    async fn get_password_hash(&self, id: Snowflake) -> RepoResult<Option<String>> {
        Ok(self.tables().users.iter().find(|(u, _)| u.id == id).map(|(_, h)| h.clone()))
    }
}

#[async_trait]
impl SectionRepository for MemoryStore {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Section>> {
        Ok(self.tables().sections.iter().find(|s| s.id == id).cloned())
    }

    async fn find_by_user(&self, user_id: Snowflake) -> RepoResult<Vec<Section>> {
        Ok(sorted_by_index(self.tables().sections.iter().filter(|s| s.user_id == user_id).cloned()))
    }

    async fn create(&self, section: &Section) -> RepoResult<i32> {
        let owner = section.user_id;
        append(&mut self.tables().sections, section, |s| s.user_id == owner)
    }

    async fn update(&self, section: &Section) -> RepoResult<()> {
        let mut tables = self.tables();
        let row = tables
            .sections
            .iter_mut()
            .find(|s| s.id == section.id)
            .ok_or(DomainError::SectionNotFound(section.id))?;
        *row = section.clone();
        Ok(())
    }

    async fn delete(&self, section: &Section) -> RepoResult<()> {
        let mut tables = self.tables();
        let owner = section.user_id;
        if !remove_and_compact(&mut tables.sections, section.id, |s| s.user_id == owner) {
            return Err(DomainError::SectionNotFound(section.id));
        }
        tables.links.retain(|l| l.section_id != section.id);
        Ok(())
    }

    async fn reorder(&self, user_id: Snowflake, ids: &[Snowflake]) -> RepoResult<()> {
        reorder_rows(&mut self.tables().sections, |s| s.user_id == user_id, ids)
    }
}

#[async_trait]
impl LinkRepository for MemoryStore {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Link>> {
        Ok(self.tables().links.iter().find(|l| l.id == id).cloned())
    }

    async fn find_by_section(&self, section_id: Snowflake) -> RepoResult<Vec<Link>> {
        Ok(sorted_by_index(self.tables().links.iter().filter(|l| l.section_id == section_id).cloned()))
    }

    async fn find_by_user(&self, user_id: Snowflake) -> RepoResult<Vec<Link>> {
        let tables = self.tables();
        let section_index: HashMap<Snowflake, i32> =
            tables.sections.iter().map(|s| (s.id, s.index)).collect();
        let mut links: Vec<Link> = tables.links.iter().filter(|l| l.user_id == user_id).cloned().collect();
        links.sort_by_key(|l| (section_index.get(&l.section_id).copied().unwrap_or_default(), l.index));
        Ok(links)
    }

    async fn create(&self, link: &Link) -> RepoResult<i32> {
        let mut tables = self.tables();
        let section_id = link.section_id;
        if !tables.sections.iter().any(|s| s.id == section_id) {
            return Err(DomainError::SectionNotFound(section_id));
        }
        append(&mut tables.links, link, |l| l.section_id == section_id)
    }

    async fn update(&self, link: &Link) -> RepoResult<()> {
        let mut tables = self.tables();
        let row = tables
            .links
            .iter_mut()
            .find(|l| l.id == link.id)
            .ok_or(DomainError::LinkNotFound(link.id))?;
        *row = link.clone();
        Ok(())
    }

    async fn delete(&self, link: &Link) -> RepoResult<()> {
        let section_id = link.section_id;
        if !remove_and_compact(&mut self.tables().links, link.id, |l| l.section_id == section_id) {
            return Err(DomainError::LinkNotFound(link.id));
        }
        Ok(())
    }

    async fn reorder(&self, section_id: Snowflake, ids: &[Snowflake]) -> RepoResult<()> {
        reorder_rows(&mut self.tables().links, |l| l.section_id == section_id, ids)
    }
}

#[async_trait]
impl SocialLinkRepository for MemoryStore {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<SocialLink>> {
        Ok(self.tables().social_links.iter().find(|l| l.id == id).cloned())
    }

    async fn find_by_user(&self, user_id: Snowflake) -> RepoResult<Vec<SocialLink>> {
        Ok(sorted_by_index(self.tables().social_links.iter().filter(|l| l.user_id == user_id).cloned()))
    }

    async fn create(&self, social_link: &SocialLink) -> RepoResult<i32> {
        let owner = social_link.user_id;
        append(&mut self.tables().social_links, social_link, |l| l.user_id == owner)
    }

    async fn update(&self, social_link: &SocialLink) -> RepoResult<()> {
        let mut tables = self.tables();
        let row = tables
            .social_links
            .iter_mut()
            .find(|l| l.id == social_link.id)
            .ok_or(DomainError::SocialLinkNotFound(social_link.id))?;
        *row = social_link.clone();
        Ok(())
    }

    async fn delete(&self, social_link: &SocialLink) -> RepoResult<()> {
        let owner = social_link.user_id;
        if !remove_and_compact(&mut self.tables().social_links, social_link.id, |l| l.user_id == owner) {
            return Err(DomainError::SocialLinkNotFound(social_link.id));
        }
        Ok(())
    }

    async fn reorder(&self, user_id: Snowflake, ids: &[Snowflake]) -> RepoResult<()> {
        reorder_rows(&mut self.tables().social_links, |l| l.user_id == user_id, ids)
    }
}

#[async_trait]
impl TestimonialRepository for MemoryStore {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Testimonial>> {
        Ok(self.tables().testimonials.iter().find(|t| t.id == id).cloned())
    }

    async fn find_by_user(&self, user_id: Snowflake) -> RepoResult<Vec<Testimonial>> {
        Ok(sorted_by_index(self.tables().testimonials.iter().filter(|t| t.user_id == user_id).cloned()))
    }

    async fn find_showcased(&self, user_id: Snowflake) -> RepoResult<Vec<Testimonial>> {
        Ok(sorted_by_index(
            self.tables()
                .testimonials
                .iter()
                .filter(|t| t.user_id == user_id && t.should_show)
                .cloned(),
        ))
    }

    async fn create(&self, testimonial: &Testimonial) -> RepoResult<i32> {
        let owner = testimonial.user_id;
        append(&mut self.tables().testimonials, testimonial, |t| t.user_id == owner)
    }

    async fn set_visibility(
        &self,
        testimonial: &Testimonial,
        should_show: bool,
        entitlements: Entitlements,
    ) -> RepoResult<()> {
        let mut tables = self.tables();
        let owner = testimonial.user_id;
        let showcased = tables.testimonials.iter().filter(|t| t.user_id == owner && t.should_show).count() as i64;

        let row = tables
            .testimonials
            .iter_mut()
            .find(|t| t.id == testimonial.id && t.user_id == owner)
            .ok_or(DomainError::TestimonialNotFound(testimonial.id))?;
        if should_show && !row.should_show {
            entitlements.ensure_can_showcase(showcased)?;
        }
        row.should_show = should_show;
        Ok(())
    }

    async fn delete(&self, testimonial: &Testimonial) -> RepoResult<()> {
        let owner = testimonial.user_id;
        if !remove_and_compact(&mut self.tables().testimonials, testimonial.id, |t| t.user_id == owner) {
            return Err(DomainError::TestimonialNotFound(testimonial.id));
        }
        Ok(())
    }

    async fn reorder(&self, user_id: Snowflake, ids: &[Snowflake]) -> RepoResult<()> {
        reorder_rows(&mut self.tables().testimonials, |t| t.user_id == user_id, ids)
    }
}

#[async_trait]
impl FormRepository for MemoryStore {
    async fn find_by_user(&self, user_id: Snowflake) -> RepoResult<Option<Form>> {
        Ok(self.tables().forms.iter().find(|f| f.user_id == user_id).cloned())
    }

    async fn upsert(&self, form: &Form) -> RepoResult<()> {
        let mut tables = self.tables();
        tables.forms.retain(|f| f.user_id != form.user_id);
        tables.forms.push(form.clone());
        Ok(())
    }

    async fn create_submission(&self, submission: &FormSubmission) -> RepoResult<()> {
        self.tables().submissions.push(submission.clone());
        Ok(())
    }

    async fn find_submission(&self, id: Snowflake) -> RepoResult<Option<FormSubmission>> {
        Ok(self.tables().submissions.iter().find(|s| s.id == id).cloned())
    }

    async fn find_submissions(
        &self,
        user_id: Snowflake,
        before: Option<Snowflake>,
        limit: i64,
    ) -> RepoResult<Vec<FormSubmission>> {
        let mut rows: Vec<FormSubmission> = self
            .tables()
            .submissions
            .iter()
            .filter(|s| s.user_id == user_id && before.is_none_or(|b| s.id < b))
            .cloned()
            .collect();
        rows.sort_by_key(|s| std::cmp::Reverse(s.id));
        rows.truncate(usize::try_from(limit).unwrap_or_default());
        Ok(rows)
    }

    async fn count_submissions_since(&self, user_id: Snowflake, since: DateTime<Utc>) -> RepoResult<i64> {
        Ok(self
            .tables()
            .submissions
            .iter()
            .filter(|s| s.user_id == user_id && s.created_at >= since)
            .count() as i64)
    }

    async fn delete_submission(&self, id: Snowflake) -> RepoResult<()> {
        let mut tables = self.tables();
        let before = tables.submissions.len();
        tables.submissions.retain(|s| s.id != id);
        if tables.submissions.len() == before {
            return Err(DomainError::SubmissionNotFound(id));
        }
        Ok(())
    }
}

#[async_trait]
impl AnalyticsRepository for MemoryStore {
    async fn record(&self, event: &AnalyticsEvent) -> RepoResult<()> {
        self.tables().events.push(event.clone());
        Ok(())
    }

    async fn count_by_kind(&self, user_id: Snowflake, window: Window) -> RepoResult<Vec<(EventKind, i64)>> {
        let mut counts: HashMap<EventKind, i64> = HashMap::new();
        for event in self.tables().events.iter() {
            if event.user_id == user_id && in_window(event.created_at, window) {
                *counts.entry(event.kind).or_default() += 1;
            }
        }
        Ok(counts.into_iter().collect())
    }

    async fn count_by_day(
        &self,
        user_id: Snowflake,
        window: Window,
    ) -> RepoResult<Vec<(NaiveDate, EventKind, i64)>> {
        let mut counts: HashMap<(NaiveDate, EventKind), i64> = HashMap::new();
        for event in self.tables().events.iter() {
            if event.user_id == user_id && in_window(event.created_at, window) {
                *counts.entry((event.created_at.date_naive(), event.kind)).or_default() += 1;
            }
        }
        Ok(counts.into_iter().map(|((day, kind), n)| (day, kind, n)).collect())
    }

    async fn clicks_by_link(
        &self,
        user_id: Snowflake,
        window: Window,
        limit: i64,
    ) -> RepoResult<Vec<(Snowflake, i64)>> {
        let mut counts: HashMap<Snowflake, i64> = HashMap::new();
        for event in self.tables().events.iter() {
            if event.user_id == user_id && event.kind == EventKind::Click && in_window(event.created_at, window) {
                if let Some(link_id) = event.link_id {
                    *counts.entry(link_id).or_default() += 1;
                }
            }
        }
        let mut rows: Vec<(Snowflake, i64)> = counts.into_iter().collect();
        rows.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
        rows.truncate(usize::try_from(limit).unwrap_or_default());
        Ok(rows)
    }

    async fn count_by_referrer(
        &self,
        user_id: Snowflake,
        window: Window,
        limit: i64,
    ) -> RepoResult<Vec<(Option<String>, i64)>> {
        let mut counts: HashMap<Option<String>, i64> = HashMap::new();
        for event in self.tables().events.iter() {
            if event.user_id == user_id && event.kind.is_view() && in_window(event.created_at, window) {
                *counts.entry(event.referrer.clone()).or_default() += 1;
            }
        }
        let mut rows: Vec<(Option<String>, i64)> = counts.into_iter().collect();
        rows.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
        rows.truncate(usize::try_from(limit).unwrap_or_default());
        Ok(rows)
    }
}

#[async_trait]
impl AppearanceRepository for MemoryStore {
    async fn find_by_user(&self, user_id: Snowflake) -> RepoResult<Appearance> {
        Ok(self
            .tables()
            .appearances
            .get(&user_id)
            .cloned()
            .unwrap_or_else(|| Appearance::default_for(user_id)))
    }

    async fn save_theme(&self, theme: &Theme) -> RepoResult<()> {
        let mut tables = self.tables();
        let entry = tables
            .appearances
            .entry(theme.user_id)
            .or_insert_with(|| Appearance::default_for(theme.user_id));
        entry.theme = theme.clone();
        Ok(())
    }

    async fn save_layout(&self, layout: &Layout) -> RepoResult<()> {
        let mut tables = self.tables();
        let entry = tables
            .appearances
            .entry(layout.user_id)
            .or_insert_with(|| Appearance::default_for(layout.user_id));
        entry.layout = layout.clone();
        Ok(())
    }

    async fn save_button(&self, button: &ButtonStyle) -> RepoResult<()> {
        let mut tables = self.tables();
        let entry = tables
            .appearances
            .entry(button.user_id)
            .or_insert_with(|| Appearance::default_for(button.user_id));
        entry.button = button.clone();
        Ok(())
    }

    async fn save_settings(&self, settings: &Settings) -> RepoResult<()> {
        let mut tables = self.tables();
        let entry = tables
            .appearances
            .entry(settings.user_id)
            .or_insert_with(|| Appearance::default_for(settings.user_id));
        entry.settings = settings.clone();
        Ok(())
    }
}

#[async_trait]
impl SubscriptionRepository for MemoryStore {
    async fn find_by_user(&self, user_id: Snowflake) -> RepoResult<Option<Subscription>> {
        Ok(self.tables().subscriptions.iter().find(|s| s.user_id == user_id).cloned())
    }

    async fn upsert(&self, subscription: &Subscription) -> RepoResult<()> {
        let mut tables = self.tables();
        tables.subscriptions.retain(|s| s.user_id != subscription.user_id);
        tables.subscriptions.push(subscription.clone());
        Ok(())
    }
}

/// Records deleted public ids; can be told to fail every delete
#[derive(Default)]
pub struct FakeImageStore {
    pub deleted: Mutex<Vec<String>>,
    pub fail_deletes: bool,
}

#[async_trait]
impl ImageStore for FakeImageStore {
    fn upload_signature(&self) -> Result<UploadSignature, DomainError> {
        Ok(UploadSignature {
            upload_url: "https://images.test/upload".to_string(),
            api_key: "key".to_string(),
            public_id: "linkify/abc".to_string(),
            timestamp: 1_700_000_000,
            signature: "sig".to_string(),
            signature_algorithm: "sha256".to_string(),
        })
    }

    async fn delete(&self, public_id: &str) -> Result<(), DomainError> {
        if self.fail_deletes {
            return Err(DomainError::ExternalServiceError("image host down".into()));
        }
        self.deleted.lock().unwrap().push(public_id.to_string());
        Ok(())
    }
}

#[derive(Default)]
pub struct FakeBilling {
    pub requests: Mutex<Vec<CheckoutRequest>>,
}

#[async_trait]
impl BillingProvider for FakeBilling {
    async fn create_checkout(&self, request: &CheckoutRequest) -> Result<String, DomainError> {
        self.requests.lock().unwrap().push(request.clone());
        Ok(format!("https://checkout.test/{}", request.user_id))
    }
}

pub struct Harness {
    pub ctx: ServiceContext,
    pub store: MemoryStore,
    pub images: Arc<FakeImageStore>,
    pub billing: Arc<FakeBilling>,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_images(FakeImageStore::default())
    }

    pub fn with_images(images: FakeImageStore) -> Self {
        let store = MemoryStore::default();
        let images = Arc::new(images);
        let billing = Arc::new(FakeBilling::default());

        let ctx = ServiceContextBuilder::new()
            .user_repo(Arc::new(store.clone()))
            .section_repo(Arc::new(store.clone()))
            .link_repo(Arc::new(store.clone()))
            .social_link_repo(Arc::new(store.clone()))
            .testimonial_repo(Arc::new(store.clone()))
            .form_repo(Arc::new(store.clone()))
            .analytics_repo(Arc::new(store.clone()))
            .appearance_repo(Arc::new(store.clone()))
            .subscription_repo(Arc::new(store.clone()))
            .image_store(images.clone())
            .billing(billing.clone())
            .jwt_service(Arc::new(JwtService::new("test-secret-key-that-is-long-enough", 900, 86_400)))
            .snowflake_generator(Arc::new(SnowflakeGenerator::new(1)))
            .settings(ServiceSettings {
                public_base_url: "https://linkify.test/".to_string(),
                webhook_secret: WEBHOOK_SECRET.to_string(),
            })
            .build()
            .unwrap();

        Self { ctx, store, images, billing }
    }

    /// Insert a user directly, bypassing registration
    pub fn user(&self, username: &str) -> User {
        let user = User::new(self.ctx.generate_id(), format!("{username}@example.com"), username.to_string());
        let hash = hash_password(PASSWORD).unwrap();
        let mut tables = self.store.tables();
        tables.users.push((user.clone(), hash));
        tables.appearances.insert(user.id, Appearance::default_for(user.id));
        user
    }

    pub fn make_pro(&self, user_id: Snowflake) {
        let now = Utc::now();
        self.store.tables().subscriptions.push(Subscription {
            id: self.ctx.generate_id(),
            user_id,
            provider_subscription_id: "sub_1".to_string(),
            customer_id: "cus_1".to_string(),
            variant_id: "var_1".to_string(),
            status: SubscriptionStatus::Active,
            renews_at: None,
            ends_at: None,
            customer_portal_url: Some("https://pay.test/portal".to_string()),
            created_at: now,
            updated_at: now,
        });
    }

    pub fn deleted_images(&self) -> Vec<String> {
        self.images.deleted.lock().unwrap().clone()
    }
}
