use super::*;
use crate::errors::{DatabaseError, Error, Result};
use async_trait::async_trait;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::sync::{Arc, Mutex};

#[derive(Default)]
struct MockFxRepository {
    stored: Mutex<Option<Rate>>,
    fail_saves: bool,
}

#[async_trait]
impl FxRepositoryTrait for MockFxRepository {
    fn get_latest_rate(&self, _from: Currency, _to: Currency) -> Result<Option<Rate>> {
        Ok(self.stored.lock().unwrap().clone())
    }

    async fn save_rate(&self, rate: Rate) -> Result<Rate> {
        if self.fail_saves {
            return Err(Error::Database(DatabaseError::QueryFailed(
                "disk full".to_string(),
            )));
        }
        *self.stored.lock().unwrap() = Some(rate.clone());
        Ok(rate)
    }
}

struct FixedSource(Decimal);

#[async_trait]
impl RateSourceTrait for FixedSource {
    fn data_source(&self) -> DataSource {
        DataSource::Cnb
    }

    async fn fetch_rate(&self, _from: Currency, _to: Currency) -> Result<Decimal> {
        Ok(self.0)
    }
}

struct FailingSource;

#[async_trait]
impl RateSourceTrait for FailingSource {
    fn data_source(&self) -> DataSource {
        DataSource::Cnb
    }

    async fn fetch_rate(&self, _from: Currency, _to: Currency) -> Result<Decimal> {
        Err(FxError::RateFetch("connection refused".to_string()).into())
    }
}

fn service_with(repo: Arc<MockFxRepository>, source: Arc<dyn RateSourceTrait>) -> FxService {
    FxService::new(repo, source)
}

#[test]
fn require_current_fails_before_any_rate() {
    let service = service_with(Arc::new(MockFxRepository::default()), Arc::new(FailingSource));
    service.initialize().unwrap();

    assert!(service.get_current().unwrap().is_none());
    let err = service.require_current().unwrap_err();
    assert!(matches!(err, Error::Fx(FxError::RateUnavailable { .. })));
}

#[test]
fn initialize_loads_persisted_rate() {
    let repo = Arc::new(MockFxRepository::default());
    *repo.stored.lock().unwrap() = Some(Rate::new(dec!(0.034), DataSource::Manual).unwrap());
    let service = service_with(repo, Arc::new(FailingSource));

    service.initialize().unwrap();

    assert_eq!(service.require_current().unwrap().value, dec!(0.034));
}

#[tokio::test]
async fn refresh_replaces_and_persists_rate() {
    let repo = Arc::new(MockFxRepository::default());
    let service = service_with(repo.clone(), Arc::new(FixedSource(dec!(0.0355290272))));

    let rate = service.refresh().await.unwrap();

    assert_eq!(rate.value, dec!(0.03552903));
    assert_eq!(rate.source, DataSource::Cnb);
    assert_eq!(service.require_current().unwrap(), rate);
    assert_eq!(repo.stored.lock().unwrap().clone(), Some(rate));
}

#[tokio::test]
async fn failed_refresh_keeps_previous_rate() {
    let repo = Arc::new(MockFxRepository::default());
    let service = service_with(repo.clone(), Arc::new(FailingSource));
    let manual = service.set_manual(dec!(0.03)).await.unwrap();

    let err = service.refresh().await.unwrap_err();

    assert!(matches!(err, Error::Fx(FxError::RateFetch(_))));
    assert_eq!(service.require_current().unwrap(), manual);
    assert_eq!(repo.stored.lock().unwrap().clone(), Some(manual));
}

#[tokio::test]
async fn refresh_with_invalid_value_is_a_fetch_error() {
    let service = service_with(
        Arc::new(MockFxRepository::default()),
        Arc::new(FixedSource(Decimal::ZERO)),
    );

    let err = service.refresh().await.unwrap_err();

    assert!(matches!(err, Error::Fx(FxError::RateFetch(_))));
    assert!(service.get_current().unwrap().is_none());
}

#[tokio::test]
async fn refresh_that_cannot_persist_leaves_memory_untouched() {
    let repo = Arc::new(MockFxRepository {
        stored: Mutex::new(None),
        fail_saves: true,
    });
    let service = service_with(repo, Arc::new(FixedSource(dec!(0.04))));

    assert!(service.refresh().await.is_err());
    assert!(service.get_current().unwrap().is_none());
}

#[tokio::test]
async fn manual_rate_must_be_positive() {
    let service = service_with(Arc::new(MockFxRepository::default()), Arc::new(FailingSource));

    let err = service.set_manual(dec!(-1)).await.unwrap_err();

    assert!(matches!(err, Error::Fx(FxError::InvalidRate(_))));
    assert!(service.get_current().unwrap().is_none());
}
