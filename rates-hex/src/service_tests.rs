//! ConversionService unit tests.

#[cfg(test)]
pub(crate) mod tests {
    use std::sync::Arc;

    use rates_types::{AppError, ConvertRequest, LookupError, OutputFormat, RateKey};

    use crate::cache_tests::tests::ScriptedPort;
    use crate::{ConversionService, CurrencyValidator, RateCache, StaticRateProvider};

    fn request(from: &str, to: &str, amount: f64) -> ConvertRequest {
        ConvertRequest {
            from: from.to_string(),
            to: to.to_string(),
            amount,
            format: OutputFormat::Plain,
            precision: None,
        }
    }

    fn scripted_service(rate: f64) -> ConversionService<ScriptedPort> {
        ConversionService::new(Arc::new(RateCache::new()), ScriptedPort::returning(rate))
    }

    #[tokio::test]
    async fn test_convert_success() {
        let service = scripted_service(0.9);

        let resp = service.convert(request("usd", "eur", 100.0)).await.unwrap();

        assert_eq!(resp.from.as_str(), "USD");
        assert_eq!(resp.to.as_str(), "EUR");
        assert_eq!(resp.rate, 0.9);
        assert!((resp.converted - 90.0).abs() < 1e-9);
        assert_eq!(resp.formatted, "Результат конвертации: 90.00 EUR");
    }

    #[tokio::test]
    async fn test_convert_fancy_with_precision() {
        let service = scripted_service(0.9);

        let mut req = request("USD", "EUR", 10.0);
        req.format = OutputFormat::Fancy;
        req.precision = Some(4);
        let resp = service.convert(req).await.unwrap();

        assert_eq!(resp.formatted, "✨ Conversion result: 9.0000 EUR ✨");
    }

    #[tokio::test]
    async fn test_repeated_conversions_hit_cache() {
        let service = scripted_service(0.9);

        service.convert(request("USD", "EUR", 1.0)).await.unwrap();
        service.convert(request("USD", "EUR", 2.0)).await.unwrap();
        service.convert(request("usd", "eur", 3.0)).await.unwrap();

        assert_eq!(service.lookup().calls(), 1);
        assert_eq!(service.cache_stats().hits, 2);
    }

    #[tokio::test]
    async fn test_convert_unsupported_currency_fails() {
        let service = scripted_service(0.9);

        let result = service.convert(request("USD", "XYZ", 1.0)).await;

        assert!(matches!(result, Err(AppError::BadRequest(_))));
        assert_eq!(service.lookup().calls(), 0);
    }

    #[tokio::test]
    async fn test_convert_non_positive_amount_fails() {
        let service = scripted_service(0.9);

        let zero = service.convert(request("USD", "EUR", 0.0)).await;
        let negative = service.convert(request("USD", "EUR", -5.0)).await;

        assert!(matches!(zero, Err(AppError::BadRequest(_))));
        assert!(matches!(negative, Err(AppError::BadRequest(_))));
    }

    #[tokio::test]
    async fn test_convert_precision_out_of_range_fails() {
        let service = scripted_service(0.9);

        let mut req = request("USD", "EUR", 1.0);
        req.precision = Some(11);

        assert!(matches!(
            service.convert(req).await,
            Err(AppError::BadRequest(_))
        ));
    }

    #[tokio::test]
    async fn test_convert_lookup_failure_propagates() {
        let err = LookupError::Unavailable("down".into());
        let service =
            ConversionService::new(Arc::new(RateCache::new()), ScriptedPort::failing(err.clone()));

        let result = service.convert(request("USD", "EUR", 1.0)).await;

        assert!(matches!(result, Err(AppError::Lookup(e)) if e == err));
    }

    #[tokio::test]
    async fn test_restricted_validator() {
        let service = scripted_service(0.9).with_validator(CurrencyValidator::new(["USD", "RUB"]));

        assert!(service.convert(request("USD", "RUB", 1.0)).await.is_ok());
        assert!(matches!(
            service.convert(request("USD", "EUR", 1.0)).await,
            Err(AppError::BadRequest(_))
        ));
        assert_eq!(service.supported_currencies().len(), 2);
    }

    #[tokio::test]
    async fn test_rate_reports_fetch_time() {
        let service = ConversionService::new(Arc::new(RateCache::new()), StaticRateProvider);

        let first = service.rate("EUR", "USD").await.unwrap();
        let second = service.rate("EUR", "USD").await.unwrap();

        assert!((first.rate - 1.087).abs() < 1e-9);
        assert_eq!(first.fetched_at, second.fetched_at);
    }

    #[tokio::test]
    async fn test_shared_cache_between_services() {
        let cache = Arc::new(RateCache::new());
        let a = ConversionService::new(cache.clone(), ScriptedPort::returning(0.9));
        let b = ConversionService::new(cache.clone(), ScriptedPort::returning(0.5));

        a.convert(request("USD", "EUR", 1.0)).await.unwrap();
        let resp = b.convert(request("USD", "EUR", 1.0)).await.unwrap();

        assert_eq!(resp.rate, 0.9);
        assert_eq!(b.lookup().calls(), 0);
    }

    #[tokio::test]
    async fn test_supported_currencies_describe_catalog() {
        let service = scripted_service(1.0);

        let currencies = service.supported_currencies();
        let jpy = currencies
            .iter()
            .find(|c| c.code.as_str() == "JPY")
            .unwrap();

        assert_eq!(jpy.symbol, "¥");
        assert_eq!(jpy.decimal_places, 0);
    }

    #[tokio::test]
    async fn test_static_provider_unknown_pair_surface() {
        let service = ConversionService::new(Arc::new(RateCache::new()), StaticRateProvider)
            .with_validator(CurrencyValidator::new(["USD", "CHF"]));

        let result = service.convert(request("USD", "CHF", 1.0)).await;

        assert!(matches!(
            result,
            Err(AppError::Lookup(LookupError::UnknownPair(key))) if key == RateKey::new("USD", "CHF")
        ));
    }
}
