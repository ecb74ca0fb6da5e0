#![allow(dead_code)]

use async_trait::async_trait;
use axum::extract::connect_info::MockConnectInfo;
use axum::http::{HeaderName, HeaderValue};
use axum_test::{TestRequest, TestServer};
use chrono::{Duration as ChronoDuration, NaiveDate, Timelike, Utc};
use serde_json::json;
use std::collections::{HashMap, HashSet};
use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use shorty::application::services::LinkSettings;
use shorty::domain::entities::{
    Contact, EventKind, Link, LinkStatus, NewAnalyticsEvent, NewContact, NewLink, NewReport,
    NewVisit, Report, ReportStatus, Visit,
};
use shorty::domain::repositories::{
    ACTIVE_LONG_URL_CONSTRAINT, AnalyticsRepository, ContactRepository, DIRECT_REFERER,
    DailyCount, HourlyCount, LinkOverview, LinkRepository, RefererCount, ReportRepository,
    SHORT_CODE_CONSTRAINT, VisitRepository, VisitSummary,
};
use shorty::error::AppError;
use shorty::routes::app_routes;
use shorty::state::{AppState, Repositories, ServiceSettings};

pub const SHORT_URL_BASE: &str = "https://shorty.co/";
pub const API: &str = "/api/shorty-url";

fn unavailable() -> AppError {
    AppError::storage("store unavailable", json!({}))
}

fn daily(dates: impl Iterator<Item = NaiveDate>, days: i64) -> Vec<DailyCount> {
    let today = Utc::now().date_naive();
    let mut counts: HashMap<NaiveDate, i64> = HashMap::new();
    for date in dates.filter(|d| (today - *d).num_days() < days) {
        *counts.entry(date).or_default() += 1;
    }

    let mut out: Vec<DailyCount> = counts
        .into_iter()
        .map(|(date, count)| DailyCount { date, count })
        .collect();
    out.sort_by(|a, b| b.date.cmp(&a.date));
    out
}

/// Link store enforcing the same unique constraints as the database.
#[derive(Default)]
pub struct MemoryLinks {
    links: Mutex<Vec<Link>>,
    pub offline: AtomicBool,
}

impl MemoryLinks {
    pub fn all(&self) -> Vec<Link> {
        self.links.lock().unwrap().clone()
    }

    pub fn by_code(&self, code: &str) -> Option<Link> {
        self.all().into_iter().find(|l| l.short_code == code)
    }

    /// Inserts a link directly, bypassing issuance.
    pub fn insert(&self, code: &str, long_url: &str, status: LinkStatus) -> Link {
        let mut links = self.links.lock().unwrap();
        let link = Link {
            id: links.len() as i64 + 1,
            long_url: long_url.to_string(),
            short_code: code.to_string(),
            status,
            click_count: 0,
            qr_generated_count: 0,
            created_at: Utc::now(),
            creator_ip: None,
            creator_user_agent: None,
        };
        links.push(link.clone());
        link
    }

    fn set_status(&self, id: i64, status: LinkStatus, only_from: Option<LinkStatus>) -> bool {
        let mut links = self.links.lock().unwrap();
        match links.iter_mut().find(|l| l.id == id) {
            Some(link) if only_from.is_none_or(|from| link.status == from) => {
                link.status = status;
                true
            }
            _ => false,
        }
    }

    fn check(&self) -> Result<(), AppError> {
        if self.offline.load(Ordering::SeqCst) {
            Err(unavailable())
        } else {
            Ok(())
        }
    }
}

fn status_rank(status: LinkStatus) -> u8 {
    match status {
        LinkStatus::Blacklisted => 0,
        LinkStatus::Active => 1,
        LinkStatus::Expired => 2,
    }
}

#[async_trait]
impl LinkRepository for MemoryLinks {
    async fn create(&self, new_link: NewLink) -> Result<Link, AppError> {
        self.check()?;
        let mut links = self.links.lock().unwrap();

        if links.iter().any(|l| l.short_code == new_link.short_code) {
            return Err(AppError::conflict(
                "Unique constraint violation",
                json!({ "constraint": SHORT_CODE_CONSTRAINT }),
            ));
        }
        if links
            .iter()
            .any(|l| l.long_url == new_link.long_url && l.status == LinkStatus::Active)
        {
            return Err(AppError::conflict(
                "Unique constraint violation",
                json!({ "constraint": ACTIVE_LONG_URL_CONSTRAINT }),
            ));
        }

        let link = Link {
            id: links.len() as i64 + 1,
            long_url: new_link.long_url,
            short_code: new_link.short_code,
            status: LinkStatus::Active,
            click_count: 0,
            qr_generated_count: 0,
            created_at: Utc::now(),
            creator_ip: new_link.creator_ip,
            creator_user_agent: new_link.creator_user_agent,
        };
        links.push(link.clone());
        Ok(link)
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<Link>, AppError> {
        self.check()?;
        Ok(self.by_code(code))
    }

    async fn find_by_long_url(&self, long_url: &str) -> Result<Option<Link>, AppError> {
        self.check()?;
        Ok(self
            .all()
            .into_iter()
            .filter(|l| l.long_url == long_url)
            .min_by_key(|l| (status_rank(l.status), -l.id)))
    }

    async fn increment_clicks(&self, id: i64) -> Result<(), AppError> {
        self.check()?;
        let mut links = self.links.lock().unwrap();
        if let Some(link) = links.iter_mut().find(|l| l.id == id) {
            link.click_count += 1;
        }
        Ok(())
    }

    async fn increment_qr(&self, code: &str) -> Result<Option<i64>, AppError> {
        self.check()?;
        let mut links = self.links.lock().unwrap();
        Ok(links.iter_mut().find(|l| l.short_code == code).map(|link| {
            link.qr_generated_count += 1;
            link.qr_generated_count
        }))
    }

    async fn blacklist(&self, id: i64) -> Result<bool, AppError> {
        self.check()?;
        Ok(self.set_status(id, LinkStatus::Blacklisted, None))
    }

    async fn expire(&self, id: i64) -> Result<bool, AppError> {
        self.check()?;
        Ok(self.set_status(id, LinkStatus::Expired, Some(LinkStatus::Active)))
    }

    async fn overview(&self) -> Result<LinkOverview, AppError> {
        self.check()?;
        let links = self.all();
        let today = Utc::now().date_naive();
        let count = |status| links.iter().filter(|l| l.status == status).count() as i64;

        Ok(LinkOverview {
            total_links: links.len() as i64,
            total_clicks: links.iter().map(|l| l.click_count).sum(),
            total_blacklisted: count(LinkStatus::Blacklisted),
            total_expired: count(LinkStatus::Expired),
            created_today: links
                .iter()
                .filter(|l| l.created_at.date_naive() == today)
                .count() as i64,
            total_qr_generated: links.iter().map(|l| l.qr_generated_count).sum(),
        })
    }

    async fn created_per_day(&self, days: i64) -> Result<Vec<DailyCount>, AppError> {
        self.check()?;
        Ok(daily(
            self.all().iter().map(|l| l.created_at.date_naive()),
            days,
        ))
    }

    async fn recent(&self, limit: i64) -> Result<Vec<Link>, AppError> {
        self.check()?;
        let mut links: Vec<Link> = self.all().into_iter().filter(Link::is_active).collect();
        links.sort_by(|a, b| b.id.cmp(&a.id));
        links.truncate(limit as usize);
        Ok(links)
    }

    async fn top_performing(&self, limit: i64) -> Result<Vec<Link>, AppError> {
        self.check()?;
        let mut links: Vec<Link> = self.all().into_iter().filter(Link::is_active).collect();
        links.sort_by(|a, b| b.click_count.cmp(&a.click_count).then(b.id.cmp(&a.id)));
        links.truncate(limit as usize);
        Ok(links)
    }

    async fn ping(&self) -> Result<(), AppError> {
        self.check()
    }
}

#[derive(Default)]
pub struct MemoryVisits {
    visits: Mutex<Vec<Visit>>,
    /// When set, `record` fails while reads keep working.
    pub fail_writes: AtomicBool,
}

impl MemoryVisits {
    pub fn all(&self) -> Vec<Visit> {
        self.visits.lock().unwrap().clone()
    }

    fn for_link(&self, link_id: i64) -> Vec<Visit> {
        self.all().into_iter().filter(|v| v.link_id == link_id).collect()
    }
}

#[async_trait]
impl VisitRepository for MemoryVisits {
    async fn record(&self, new_visit: NewVisit) -> Result<Visit, AppError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(unavailable());
        }

        let mut visits = self.visits.lock().unwrap();
        let visit = Visit {
            id: visits.len() as i64 + 1,
            link_id: new_visit.link_id,
            visitor_ip: new_visit.visitor_ip,
            visitor_user_agent: new_visit.visitor_user_agent,
            referer: new_visit.referer,
            visited_at: Utc::now(),
        };
        visits.push(visit.clone());
        Ok(visit)
    }

    async fn summary(&self, link_id: i64) -> Result<VisitSummary, AppError> {
        let visits = self.for_link(link_id);
        let now = Utc::now();
        let unique: HashSet<&String> = visits.iter().filter_map(|v| v.visitor_ip.as_ref()).collect();

        Ok(VisitSummary {
            total_visits: visits.len() as i64,
            unique_visitors: unique.len() as i64,
            visits_today: visits
                .iter()
                .filter(|v| v.visited_at.date_naive() == now.date_naive())
                .count() as i64,
            visits_last_week: visits
                .iter()
                .filter(|v| v.visited_at > now - ChronoDuration::days(7))
                .count() as i64,
        })
    }

    async fn daily_visits(&self, link_id: i64, days: i64) -> Result<Vec<DailyCount>, AppError> {
        Ok(daily(
            self.for_link(link_id).iter().map(|v| v.visited_at.date_naive()),
            days,
        ))
    }

    async fn top_referers(&self, link_id: i64, limit: i64) -> Result<Vec<RefererCount>, AppError> {
        let mut counts: HashMap<String, i64> = HashMap::new();
        for visit in self.for_link(link_id) {
            let referer = visit
                .referer
                .filter(|r| !r.is_empty())
                .unwrap_or_else(|| DIRECT_REFERER.to_string());
            *counts.entry(referer).or_default() += 1;
        }

        let mut out: Vec<RefererCount> = counts
            .into_iter()
            .map(|(referer, count)| RefererCount { referer, count })
            .collect();
        out.sort_by(|a, b| b.count.cmp(&a.count).then(a.referer.cmp(&b.referer)));
        out.truncate(limit as usize);
        Ok(out)
    }

    async fn count_today(&self) -> Result<i64, AppError> {
        let today = Utc::now().date_naive();
        Ok(self
            .all()
            .iter()
            .filter(|v| v.visited_at.date_naive() == today)
            .count() as i64)
    }

    async fn visits_per_day(&self, days: i64) -> Result<Vec<DailyCount>, AppError> {
        Ok(daily(
            self.all().iter().map(|v| v.visited_at.date_naive()),
            days,
        ))
    }

    async fn hourly_distribution(&self) -> Result<Vec<HourlyCount>, AppError> {
        let since = Utc::now() - ChronoDuration::hours(24);
        let mut counts: HashMap<i32, i64> = HashMap::new();
        for visit in self.all().iter().filter(|v| v.visited_at > since) {
            *counts.entry(visit.visited_at.hour() as i32).or_default() += 1;
        }

        Ok(counts
            .into_iter()
            .map(|(hour, count)| HourlyCount { hour, count })
            .collect())
    }
}

#[derive(Default)]
pub struct MemoryReports {
    reports: Mutex<Vec<Report>>,
}

impl MemoryReports {
    pub fn all(&self) -> Vec<Report> {
        self.reports.lock().unwrap().clone()
    }
}

#[async_trait]
impl ReportRepository for MemoryReports {
    async fn create_unless_recent(
        &self,
        new_report: NewReport,
        window_hours: i64,
    ) -> Result<Option<Report>, AppError> {
        let mut reports = self.reports.lock().unwrap();
        let since = Utc::now() - ChronoDuration::hours(window_hours);

        if reports.iter().any(|r| {
            r.short_code == new_report.short_code
                && r.reporter_ip == new_report.reporter_ip
                && r.reported_at > since
        }) {
            return Ok(None);
        }

        let report = Report {
            id: reports.len() as i64 + 1,
            reporter_email: new_report.reporter_email,
            short_code: new_report.short_code,
            link_id: new_report.link_id,
            detail: new_report.detail,
            reporter_ip: new_report.reporter_ip,
            reporter_user_agent: new_report.reporter_user_agent,
            status: ReportStatus::Pending,
            reported_at: Utc::now(),
        };
        reports.push(report.clone());
        Ok(Some(report))
    }

    async fn count_by_code(&self, short_code: &str) -> Result<i64, AppError> {
        Ok(self
            .all()
            .iter()
            .filter(|r| r.short_code == short_code)
            .count() as i64)
    }

    async fn find_for_reporter(
        &self,
        id: i64,
        reporter_ip: &str,
    ) -> Result<Option<Report>, AppError> {
        Ok(self
            .all()
            .into_iter()
            .find(|r| r.id == id && r.reporter_ip == reporter_ip))
    }
}

#[derive(Default)]
pub struct MemoryContacts {
    contacts: Mutex<Vec<Contact>>,
}

impl MemoryContacts {
    pub fn all(&self) -> Vec<Contact> {
        self.contacts.lock().unwrap().clone()
    }
}

#[async_trait]
impl ContactRepository for MemoryContacts {
    async fn create(&self, new_contact: NewContact) -> Result<Contact, AppError> {
        let mut contacts = self.contacts.lock().unwrap();
        let contact = Contact {
            id: contacts.len() as i64 + 1,
            fullname: new_contact.fullname,
            email: new_contact.email,
            message: new_contact.message,
            sender_ip: new_contact.sender_ip,
            sender_user_agent: new_contact.sender_user_agent,
            status: "pending".to_string(),
            sent_at: Utc::now(),
        };
        contacts.push(contact.clone());
        Ok(contact)
    }

    async fn count_recent_by_ip(&self, ip: &str, window_minutes: i64) -> Result<i64, AppError> {
        let since = Utc::now() - ChronoDuration::minutes(window_minutes);
        Ok(self
            .all()
            .iter()
            .filter(|c| c.sender_ip == ip && c.sent_at > since)
            .count() as i64)
    }
}

#[derive(Default)]
pub struct MemoryAnalytics {
    events: Mutex<Vec<NewAnalyticsEvent>>,
}

impl MemoryAnalytics {
    pub fn count(&self, kind: EventKind) -> usize {
        self.events
            .lock()
            .unwrap()
            .iter()
            .filter(|e| e.kind == kind)
            .count()
    }
}

#[async_trait]
impl AnalyticsRepository for MemoryAnalytics {
    async fn track(&self, event: NewAnalyticsEvent) -> Result<(), AppError> {
        self.events.lock().unwrap().push(event);
        Ok(())
    }

    async fn count_by_kind(&self, kind: EventKind) -> Result<i64, AppError> {
        Ok(self.count(kind) as i64)
    }
}

/// In-memory stores shared between a test and the server under test.
#[derive(Clone, Default)]
pub struct Stores {
    pub links: Arc<MemoryLinks>,
    pub visits: Arc<MemoryVisits>,
    pub reports: Arc<MemoryReports>,
    pub contacts: Arc<MemoryContacts>,
    pub analytics: Arc<MemoryAnalytics>,
}

impl Stores {
    pub fn repositories(&self) -> Repositories {
        Repositories {
            links: self.links.clone(),
            visits: self.visits.clone(),
            reports: self.reports.clone(),
            contacts: self.contacts.clone(),
            analytics: self.analytics.clone(),
        }
    }

    pub fn state(&self) -> AppState {
        let settings = ServiceSettings {
            link: LinkSettings {
                short_url_base: SHORT_URL_BASE.to_string(),
                ..LinkSettings::default()
            },
            ..ServiceSettings::default()
        };

        // Client IPs come from X-Forwarded-For so tests can act as several clients.
        AppState::new(self.repositories(), settings, true)
    }
}

/// Starts the full router over fresh in-memory stores.
pub fn test_server() -> (TestServer, Stores) {
    let stores = Stores::default();
    let server = server_for(&stores);
    (server, stores)
}

pub fn server_for(stores: &Stores) -> TestServer {
    let peer: SocketAddr = "127.0.0.1:12345".parse().unwrap();
    let app = app_routes(stores.state(), Duration::from_secs(10))
        .unwrap()
        .layer(MockConnectInfo(peer));

    TestServer::new(app).unwrap()
}

/// Sends `request` as if it came from `ip` through the reverse proxy.
pub fn from_ip(request: TestRequest, ip: &str) -> TestRequest {
    request.add_header(
        HeaderName::from_static("x-forwarded-for"),
        HeaderValue::from_str(ip).unwrap(),
    )
}
