use sea_orm::{DatabaseConnection, DbErr, SqlErr, TransactionTrait};
use tracing::debug;

use crate::{
    data::{AllianceRepository, AllianceTeamRepository, MatchRepository, ReportRepository},
    error::{report::ReportError, Error},
    model::{
        alliance::{AllianceColor, AllianceDto, MAX_ALLIANCE_TEAMS},
        report::{MatchReportsDto, ReportDto},
    },
};

/// Keeps alliances, their team slots, and scouting reports consistent.
///
/// An alliance for one side of a match moves from absent to holding between one and three team
/// slots as reports arrive. Submissions for the same side are serialized by locking the alliance
/// row inside the submission transaction; unique indexes on alliance side, slot team, and report
/// team decide any race the lock cannot see.
pub struct ReportService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> ReportService<'a> {
    /// Creates a new instance of [`ReportService`]
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Submit the first report of a team on one side of a match
    ///
    /// # Behavior
    /// - If the side has no alliance yet, it is created with the report's score and a single
    ///   slot for `team_number`.
    /// - If the team already holds a slot with a report, the submission is a duplicate.
    /// - If the team holds a slot without a report (filled by sync from the feed), the slot is
    ///   reused.
    /// - Otherwise a slot is added unless the alliance already has three teams.
    ///
    /// Whenever the alliance already existed, its score is replaced by the report's score. The
    /// report is stored under `team_number` regardless of the team named in `report`.
    ///
    /// # Returns
    /// - `Ok(ReportDto)`: The stored report
    /// - `Err(Error::ReportError(ReportError::UnknownMatch(_)))`: The match does not exist
    /// - `Err(Error::ReportError(ReportError::DuplicateReport { .. }))`: The team already has a
    ///   report on this side, including when a concurrent submission stored one first
    /// - `Err(Error::ReportError(ReportError::AllianceFull { .. }))`: Three other teams hold
    ///   the alliance's slots
    /// - `Err(Error::ReportError(ReportError::ConcurrentAllianceCreation { .. }))`: Another
    ///   submission created the alliance first; retrying will succeed or report a conflict
    /// - `Err(Error::DbErr(_))`: Any other database failure; nothing was written
    pub async fn submit_report(
        &self,
        match_key: &str,
        team_number: &str,
        color: AllianceColor,
        report: ReportDto,
    ) -> Result<ReportDto, Error> {
        let txn = self.db.begin().await?;

        let match_repo = MatchRepository::new(&txn);
        let alliance_repo = AllianceRepository::new(&txn);
        let team_repo = AllianceTeamRepository::new(&txn);
        let report_repo = ReportRepository::new(&txn);

        let duplicate = || ReportError::DuplicateReport {
            match_key: match_key.to_string(),
            team_number: team_number.to_string(),
            color,
        };

        if match_repo.get_by_key(match_key).await?.is_none() {
            return Err(ReportError::UnknownMatch(match_key.to_string()).into());
        }

        let alliance_id = match alliance_repo
            .get_for_update(match_key, color.is_blue())
            .await?
        {
            None => {
                let alliance = alliance_repo
                    .create(match_key, color.is_blue(), report.score)
                    .await
                    .map_err(|err| {
                        on_unique_violation(err, || ReportError::ConcurrentAllianceCreation {
                            match_key: match_key.to_string(),
                            color,
                        })
                    })?;
                team_repo
                    .create(alliance.id, team_number)
                    .await
                    .map_err(|err| on_unique_violation(err, duplicate))?;

                debug!(match_key, %color, alliance_id = alliance.id, "Created alliance");

                alliance.id
            }
            Some(alliance) => {
                let slots = team_repo.get_by_alliance_id(alliance.id).await?;

                if slots.iter().any(|slot| slot.team_number == team_number) {
                    if report_repo.get(alliance.id, team_number).await?.is_some() {
                        return Err(duplicate().into());
                    }
                } else {
                    if slots.len() >= MAX_ALLIANCE_TEAMS {
                        return Err(ReportError::AllianceFull {
                            match_key: match_key.to_string(),
                            color,
                        }
                        .into());
                    }

                    team_repo
                        .create(alliance.id, team_number)
                        .await
                        .map_err(|err| on_unique_violation(err, duplicate))?;
                }

                let alliance_id = alliance.id;
                alliance_repo.update_score(alliance, report.score).await?;

                alliance_id
            }
        };

        let stored = report_repo
            .create(alliance_id, team_number, &report)
            .await
            .map_err(|err| on_unique_violation(err, duplicate))?;

        txn.commit().await?;

        Ok(ReportDto::from(stored))
    }

    /// Replace the report of a team already on one side of a match
    ///
    /// Only the report row changes; the alliance score keeps whatever the submission or sync
    /// last wrote. A team holding a slot without a report gets its report created.
    ///
    /// # Returns
    /// - `Ok(ReportDto)`: The stored report
    /// - `Err(Error::ReportError(ReportError::AllianceNotFound { .. }))`: The side has no alliance
    /// - `Err(Error::ReportError(ReportError::TeamNotOnAlliance { .. }))`: The team holds no slot;
    ///   updates never add one
    /// - `Err(Error::ReportError(ReportError::TeamMismatch { .. }))`: `report` names another team
    /// - `Err(Error::DbErr(_))`: If a database-related error occurs
    pub async fn update_report(
        &self,
        match_key: &str,
        team_number: &str,
        color: AllianceColor,
        report: ReportDto,
    ) -> Result<ReportDto, Error> {
        let alliance_repo = AllianceRepository::new(self.db);
        let team_repo = AllianceTeamRepository::new(self.db);
        let report_repo = ReportRepository::new(self.db);

        let Some(alliance) = alliance_repo.get(match_key, color.is_blue()).await? else {
            return Err(ReportError::AllianceNotFound {
                match_key: match_key.to_string(),
                color,
            }
            .into());
        };

        let slots = team_repo.get_by_alliance_id(alliance.id).await?;
        if !slots.iter().any(|slot| slot.team_number == team_number) {
            return Err(ReportError::TeamNotOnAlliance {
                match_key: match_key.to_string(),
                team_number: team_number.to_string(),
                color,
            }
            .into());
        }

        if report.team != team_number {
            return Err(ReportError::TeamMismatch {
                path: team_number.to_string(),
                payload: report.team,
            }
            .into());
        }

        let stored = report_repo.upsert(alliance.id, team_number, &report).await?;

        Ok(ReportDto::from(stored))
    }

    pub async fn get_report(
        &self,
        match_key: &str,
        team_number: &str,
        color: AllianceColor,
    ) -> Result<ReportDto, Error> {
        let Some(alliance) = AllianceRepository::new(self.db)
            .get(match_key, color.is_blue())
            .await?
        else {
            return Err(ReportError::AllianceNotFound {
                match_key: match_key.to_string(),
                color,
            }
            .into());
        };

        let Some(report) = ReportRepository::new(self.db)
            .get(alliance.id, team_number)
            .await?
        else {
            return Err(ReportError::ReportNotFound {
                match_key: match_key.to_string(),
                team_number: team_number.to_string(),
                color,
            }
            .into());
        };

        Ok(ReportDto::from(report))
    }

    /// Get every report of a match split by alliance, empty for a match nobody reported on
    pub async fn get_reports_for_match(&self, match_key: &str) -> Result<MatchReportsDto, Error> {
        let alliances = AllianceRepository::new(self.db)
            .get_by_match_key(match_key)
            .await?;
        let alliance_ids: Vec<i32> = alliances.iter().map(|a| a.id).collect();

        let reports = ReportRepository::new(self.db)
            .get_by_alliance_ids(&alliance_ids)
            .await?;

        let mut match_reports = MatchReportsDto::default();
        for report in reports {
            let color = AllianceColor::from_is_blue(
                alliances
                    .iter()
                    .any(|a| a.id == report.alliance_id && a.is_blue),
            );

            match color {
                AllianceColor::Red => match_reports.red.push(ReportDto::from(report)),
                AllianceColor::Blue => match_reports.blue.push(ReportDto::from(report)),
            }
        }

        Ok(match_reports)
    }

    /// Get both alliances of a match, red first, each with its team slots in fill order
    pub async fn get_alliances(&self, match_key: &str) -> Result<Vec<AllianceDto>, Error> {
        let alliances = AllianceRepository::new(self.db)
            .get_by_match_key(match_key)
            .await?;
        let alliance_ids: Vec<i32> = alliances.iter().map(|a| a.id).collect();

        let slots = AllianceTeamRepository::new(self.db)
            .get_by_alliance_ids(&alliance_ids)
            .await?;

        let alliances = alliances
            .into_iter()
            .map(|alliance| {
                let teams = slots
                    .iter()
                    .filter(|slot| slot.alliance_id == alliance.id)
                    .cloned()
                    .collect();
                AllianceDto::from_models(alliance, teams)
            })
            .collect();

        Ok(alliances)
    }
}

/// Turn a unique constraint violation into the given conflict, pass anything else through
fn on_unique_violation(err: DbErr, conflict: impl FnOnce() -> ReportError) -> Error {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => conflict().into(),
        _ => err.into(),
    }
}
