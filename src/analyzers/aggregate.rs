use crate::analyzers::types::{
    CategoryMeans, GroupMean, HourlyMeans, Proportions, TempBandMeans, UserMix, WeekdayMeans,
};
use crate::analyzers::utility::share;
use crate::records::RentalRecord;
use std::collections::{BTreeMap, HashSet};

/// Groups `records` by `key`, averages `cnt` per group and marks the peak.
///
/// Groups come out in `K`'s ordering. Records whose key is `None` are
/// skipped. The peak is the first group holding the maximum mean, so ties
/// resolve to the earliest group in display order.
pub fn grouped_means<K, F>(records: &[&RentalRecord], key: F) -> Option<CategoryMeans<K>>
where
    K: Ord + Copy,
    F: Fn(&RentalRecord) -> Option<K>,
{
    let mut sums: BTreeMap<K, (u64, usize)> = BTreeMap::new();

    for record in records {
        let Some(k) = key(*record) else {
            continue;
        };
        let entry = sums.entry(k).or_default();
        entry.0 += u64::from(record.cnt);
        entry.1 += 1;
    }

    let groups: Vec<GroupMean<K>> = sums
        .into_iter()
        .map(|(key, (sum, n))| GroupMean {
            key,
            mean: sum as f64 / n as f64,
            records: n,
        })
        .collect();

    let mut peak = groups.first()?;
    for group in &groups[1..] {
        if group.mean > peak.mean {
            peak = group;
        }
    }
    let peak = peak.key;

    Some(CategoryMeans { groups, peak })
}

/// Mean daily rental count per weekday, ordered Sunday to Saturday.
pub fn weekday_means(daily: &[&RentalRecord]) -> Option<WeekdayMeans> {
    grouped_means(daily, |r| r.weekday)
}

/// Mean rental count per hour of day. Hours with no records are omitted.
pub fn hourly_means(hourly: &[&RentalRecord]) -> Option<HourlyMeans> {
    grouped_means(hourly, |r| r.hour)
}

/// Mean daily rental count per temperature band, Cold to Extreme.
pub fn temp_band_means(daily: &[&RentalRecord]) -> Option<TempBandMeans> {
    grouped_means(daily, |r| r.temp_band)
}

/// Computes the two casual/registered splits of the hourly table.
///
/// The volume split divides ride sums by the total `cnt`. The diversity
/// split counts distinct non-zero values in each column, which describes
/// how varied the observed counts are rather than how many riders there
/// were.
pub fn user_mix(hourly: &[&RentalRecord]) -> UserMix {
    let mut casual_rides = 0u64;
    let mut registered_rides = 0u64;
    let mut total_rides = 0u64;
    let mut casual_values = HashSet::new();
    let mut registered_values = HashSet::new();

    for record in hourly {
        casual_rides += u64::from(record.casual);
        registered_rides += u64::from(record.registered);
        total_rides += u64::from(record.cnt);

        if record.casual != 0 {
            casual_values.insert(record.casual);
        }
        if record.registered != 0 {
            registered_values.insert(record.registered);
        }
    }

    let volume = share(casual_rides, total_rides)
        .zip(share(registered_rides, total_rides))
        .map(|(casual, registered)| Proportions { casual, registered });

    let distinct_casual_values = casual_values.len();
    let distinct_registered_values = registered_values.len();
    let distinct_total = (distinct_casual_values + distinct_registered_values) as u64;

    let diversity = share(distinct_casual_values as u64, distinct_total)
        .zip(share(distinct_registered_values as u64, distinct_total))
        .map(|(casual, registered)| Proportions { casual, registered });

    UserMix {
        casual_rides,
        registered_rides,
        total_rides,
        distinct_casual_values,
        distinct_registered_values,
        volume,
        diversity,
    }
}
