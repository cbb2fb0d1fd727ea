use crate::application::ResolverConfig;
use crate::domain::{
    Boundary, InvalidDateError, Period, PeriodDescriptor, PredefinedPeriods, ResolvedRange,
    local_instant, period_dates,
};
use crate::infrastructure::{BoundaryHook, DateParser, HookRegistry, ResolverState};
use chrono::{DateTime, NaiveTime, TimeZone};
use log::{debug, warn};

/// Turns period descriptors into inclusive `[start, end]` instants.
///
/// "Now" is always supplied by the caller and its time zone is the local
/// zone for day boundaries: starts land on 00:00:00, ends on 23:59:59.
pub struct DateRangeResolver {
    config: ResolverConfig,
    predefined: PredefinedPeriods,
    parser: DateParser,
    hooks: HookRegistry,
}

impl DateRangeResolver {
    pub fn new(config: ResolverConfig) -> Self {
        Self::with_hooks(config, HookRegistry::new())
    }

    pub fn with_hooks(config: ResolverConfig, hooks: HookRegistry) -> Self {
        Self {
            config,
            predefined: PredefinedPeriods::default(),
            parser: DateParser::new(),
            hooks,
        }
    }

    /// Replace the table of keys treated as named periods
    pub fn with_predefined(mut self, predefined: PredefinedPeriods) -> Self {
        self.predefined = predefined;
        self
    }

    pub fn register_hook<H>(&mut self, hook: H)
    where
        H: BoundaryHook + 'static,
    {
        self.hooks.register(hook);
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    pub fn predefined(&self) -> &PredefinedPeriods {
        &self.predefined
    }

    pub fn hooks(&self) -> &HookRegistry {
        &self.hooks
    }

    /// Resolve a range. A missing or blank `end` reuses `start`; a blank
    /// `start` means this month.
    pub fn resolve<Tz>(
        &self,
        start: impl Into<PeriodDescriptor>,
        end: Option<PeriodDescriptor>,
        now: &DateTime<Tz>,
    ) -> Result<ResolvedRange<Tz>, InvalidDateError>
    where
        Tz: TimeZone,
        Tz::Offset: Copy,
    {
        let start = start.into();
        let start = if start.is_blank() {
            PeriodDescriptor::default()
        } else {
            start
        };
        let end = match end {
            Some(end) if !end.is_blank() => end,
            _ => start.clone(),
        };

        let from = self.resolve_boundary(&start, Boundary::Start, now)?;
        let to = self.resolve_boundary(&end, Boundary::End, now)?;

        ResolvedRange::new(from, to).ok_or_else(|| {
            warn!("Range '{}'..'{}' resolved with start after end", start, end);
            InvalidDateError::inverted(&start, &end)
        })
    }

    pub fn resolve_period<Tz>(
        &self,
        period: Period,
        now: &DateTime<Tz>,
    ) -> Result<ResolvedRange<Tz>, InvalidDateError>
    where
        Tz: TimeZone,
        Tz::Offset: Copy,
    {
        self.resolve(period, None, now)
    }

    /// Resolve one side of a range, hooks included
    pub fn resolve_boundary<Tz>(
        &self,
        descriptor: &PeriodDescriptor,
        boundary: Boundary,
        now: &DateTime<Tz>,
    ) -> Result<DateTime<Tz>, InvalidDateError>
    where
        Tz: TimeZone,
        Tz::Offset: Copy,
    {
        let tz = now.timezone();
        let period = self.named_period(descriptor);

        let instant = match (period, descriptor) {
            (Some(period), _) => {
                debug!("Resolving {:?} of named period {}", boundary, period);
                self.period_boundary(period, boundary, now)
                    .ok_or_else(|| InvalidDateError::out_of_range(descriptor.to_string()))?
            }
            (None, PeriodDescriptor::Timestamp(ts)) => tz
                .timestamp_opt(*ts, 0)
                .single()
                .ok_or_else(|| InvalidDateError::out_of_range(ts.to_string()))?,
            (None, other) => {
                let text = other.to_string();
                let parsed = self.parser.parse(&text, now).ok_or_else(|| {
                    warn!("Could not parse date '{}'", text);
                    InvalidDateError::unparsable(text.as_str())
                })?;
                parsed
                    .at_boundary(&tz, boundary)
                    .ok_or_else(|| InvalidDateError::out_of_range(text.as_str()))?
            }
        };

        let instant = self.apply_hooks(instant, descriptor, period, boundary, now)?;
        debug!("{:?} boundary for '{}' is {}", boundary, descriptor, instant.timestamp());
        Ok(instant)
    }

    fn named_period(&self, descriptor: &PeriodDescriptor) -> Option<Period> {
        match descriptor {
            PeriodDescriptor::Named(period) => Some(*period),
            PeriodDescriptor::Text(text) => self.predefined.lookup(text.trim()),
            PeriodDescriptor::Timestamp(_) => None,
        }
    }

    fn period_boundary<Tz: TimeZone>(
        &self,
        period: Period,
        boundary: Boundary,
        now: &DateTime<Tz>,
    ) -> Option<DateTime<Tz>> {
        let (first, last) = period_dates(period, now.date_naive(), self.config.week_start)?;
        let naive = match boundary {
            Boundary::Start => first.and_time(NaiveTime::MIN),
            Boundary::End => last.and_hms_opt(23, 59, 59)?,
        };
        local_instant(&now.timezone(), naive)
    }

    fn apply_hooks<Tz: TimeZone>(
        &self,
        instant: DateTime<Tz>,
        descriptor: &PeriodDescriptor,
        period: Option<Period>,
        boundary: Boundary,
        now: &DateTime<Tz>,
    ) -> Result<DateTime<Tz>, InvalidDateError> {
        if self.hooks.is_empty() {
            return Ok(instant);
        }

        let state = ResolverState {
            descriptor,
            period,
            week_start: self.config.week_start,
            now: now.timestamp(),
        };
        let original = instant.timestamp();
        let adjusted = self.hooks.apply(original, boundary, &state);
        if adjusted == original {
            return Ok(instant);
        }

        now.timezone()
            .timestamp_opt(adjusted, 0)
            .single()
            .ok_or_else(|| InvalidDateError::out_of_range(adjusted.to_string()))
    }
}

impl Default for DateRangeResolver {
    fn default() -> Self {
        Self::new(ResolverConfig::default())
    }
}
