//! Distance augmentation: turning station metadata into the
//! distance-augmented table consumed by the proximity map.

use crate::coordinate::LatLon;
use crate::frames::COL_DISTANCE;
use crate::metadata::{MetadataError, StationMetadata};
use bon::bon;
use haversine::{distance, Location, Units};
use log::debug;
use polars::prelude::*;

#[bon]
impl StationMetadata {
    /// Appends a great-circle `distance` column (kilometers from the given
    /// reference coordinate) and sorts the result ascending, nearest
    /// station first.
    ///
    /// This method uses a builder pattern.
    ///
    /// # Arguments
    ///
    /// * `.origin(LatLon)`: **Required.** The reference coordinate.
    /// * `.limit(usize)`: Optional. Keep only the N nearest stations.
    ///
    /// # Errors
    ///
    /// Returns [`MetadataError`] variants when coordinate columns cannot
    /// be extracted or the frame operations fail.
    ///
    /// # Examples
    ///
    /// ```
    /// use polars::prelude::*;
    /// use rainviz::{LatLon, StationMetadata};
    ///
    /// let df = df!(
    ///     "station_id" => ["S1", "S2"],
    ///     "station_name" => ["Alpha", "Beta"],
    ///     "latitude" => [-6.2, -6.9],
    ///     "longitude" => [106.8, 107.6],
    ///     "title" => ["A", "A"],
    /// )
    /// .unwrap();
    /// let metadata = StationMetadata::new(df).unwrap();
    ///
    /// let nearby = metadata
    ///     .with_distances()
    ///     .origin(LatLon(-6.2, 106.8))
    ///     .call()
    ///     .unwrap();
    /// assert_eq!(nearby.column("distance").unwrap().f64().unwrap().get(0), Some(0.0));
    /// ```
    #[builder]
    pub fn with_distances(
        &self,
        origin: LatLon,
        limit: Option<usize>,
    ) -> Result<DataFrame, MetadataError> {
        let latitudes = self.latitudes()?;
        let longitudes = self.longitudes()?;

        let distances: Vec<f64> = latitudes
            .iter()
            .zip(&longitudes)
            .map(|(&latitude, &longitude)| {
                distance(
                    Location {
                        latitude: origin.0,
                        longitude: origin.1,
                    },
                    Location {
                        latitude,
                        longitude,
                    },
                    Units::Kilometers,
                )
            })
            .collect();

        let mut df = self.frame().clone();
        df.with_column(Series::new(COL_DISTANCE.into(), distances))?;
        let mut df = df.sort([COL_DISTANCE], SortMultipleOptions::default())?;
        if let Some(limit) = limit {
            df = df.head(Some(limit));
        }
        debug!(
            "augmented {} stations with distances from {origin}",
            df.height()
        );
        Ok(df)
    }
}
