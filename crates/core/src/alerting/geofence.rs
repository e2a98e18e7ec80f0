//! Alert sent to everyone inside a polygon

use std::sync::Arc;

use konexus_domain::{
    FeatureCollection, FeatureCollectionRequest, FeatureLayerSettings, FeaturesSource,
    PolygonRings, PreviewAlertRequest, Result, SendAlertRequest,
};
use tracing::{info, instrument};

use super::ports::AlertingPort;
use super::{confirm_sent, ensure_success, load_defaults, AlertOutcome};

const SUBJECT: &str = "Alert with polygon";
const MESSAGE: &str = "This is a test alert with a location";

pub struct SendAlertWithPolygonUseCase {
    alerting: Arc<dyn AlertingPort>,
}

impl SendAlertWithPolygonUseCase {
    pub fn new(alerting: Arc<dyn AlertingPort>) -> Self {
        Self { alerting }
    }

    /// Count the recipients of `source` inside the polygon, then send an
    /// email alert geofenced to it.
    #[instrument(skip(self, bbox, coordinates))]
    pub async fn run(
        &self,
        source: FeaturesSource,
        bbox: Vec<f64>,
        coordinates: PolygonRings,
    ) -> Result<AlertOutcome> {
        let mut settings = load_defaults(self.alerting.as_ref()).await?;

        let geojson = FeatureCollection::single_polygon(bbox, coordinates);
        let counts = self
            .alerting
            .count_features(
                source,
                &FeatureCollectionRequest { counts_only: true, geo_json: geojson.clone() },
            )
            .await?;
        info!(%source, count = counts.count, "recipients inside polygon");

        settings.recipients.feature_layers =
            Some(vec![FeatureLayerSettings { features_source: source, count: counts.count }]);
        settings.recipients.geofences = Some(geojson);
        settings.message.basic.subject = Some(SUBJECT.to_string());
        settings.message.basic.message = Some(MESSAGE.to_string());
        settings.channels.email.send = true;

        let preview =
            self.alerting.preview_alert(&PreviewAlertRequest { settings: settings.clone() }).await?;
        ensure_success(&preview, || "Failed to create alert preview".to_string())?;

        let sent = self.alerting.send_alert(&SendAlertRequest { settings, is_async: true }).await?;
        confirm_sent(self.alerting.as_ref(), sent).await
    }
}
