//! Code enumerations accepted by the stats, schedule and roster endpoints.

use std::str::FromStr;

/// Stat group ("hitting", "pitching", "fielding").
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StatGroup {
    Hitting,
    Pitching,
    Fielding,
}

impl StatGroup {
    pub const ALL: [StatGroup; 3] = [StatGroup::Hitting, StatGroup::Pitching, StatGroup::Fielding];

    pub fn as_str(&self) -> &'static str {
        match self {
            StatGroup::Hitting => "hitting",
            StatGroup::Pitching => "pitching",
            StatGroup::Fielding => "fielding",
        }
    }
}

impl std::fmt::Display for StatGroup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for StatGroup {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "hitting" | "batting" => Ok(StatGroup::Hitting),
            "pitching" => Ok(StatGroup::Pitching),
            "fielding" => Ok(StatGroup::Fielding),
            other => Err(format!("unknown stat group: {}", other)),
        }
    }
}

/// Stat type passed as `stats=` to the stats endpoints.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StatType {
    Season,
    SeasonAdvanced,
    Career,
    CareerAdvanced,
    YearByYear,
    YearByYearAdvanced,
    YearByYearPlayoffs,
    GameLog,
    ByDateRange,
    ByDateRangeAdvanced,
    StatSplits,
    StatSplitsAdvanced,
    VsPlayer,
    VsPlayerTotal,
    VsPlayer5Y,
    VsTeam,
    VsTeamTotal,
    VsTeam5Y,
    PlayLog,
    PitchLog,
}

impl StatType {
    pub fn as_str(&self) -> &'static str {
        match self {
            StatType::Season => "season",
            StatType::SeasonAdvanced => "seasonAdvanced",
            StatType::Career => "career",
            StatType::CareerAdvanced => "careerAdvanced",
            StatType::YearByYear => "yearByYear",
            StatType::YearByYearAdvanced => "yearByYearAdvanced",
            StatType::YearByYearPlayoffs => "yearByYearPlayoffs",
            StatType::GameLog => "gameLog",
            StatType::ByDateRange => "byDateRange",
            StatType::ByDateRangeAdvanced => "byDateRangeAdvanced",
            StatType::StatSplits => "statSplits",
            StatType::StatSplitsAdvanced => "statSplitsAdvanced",
            StatType::VsPlayer => "vsPlayer",
            StatType::VsPlayerTotal => "vsPlayerTotal",
            StatType::VsPlayer5Y => "vsPlayer5Y",
            StatType::VsTeam => "vsTeam",
            StatType::VsTeamTotal => "vsTeamTotal",
            StatType::VsTeam5Y => "vsTeam5Y",
            StatType::PlayLog => "playLog",
            StatType::PitchLog => "pitchLog",
        }
    }

    pub fn is_advanced(&self) -> bool {
        self.as_str().to_lowercase().contains("advanced")
    }

    /// `vsTeam`, `vsTeamTotal`, `vsTeam5Y`: require an opposing team.
    pub fn is_vs_team(&self) -> bool {
        matches!(
            self,
            StatType::VsTeam | StatType::VsTeamTotal | StatType::VsTeam5Y
        )
    }

    /// `vsPlayer`, `vsPlayerTotal`, `vsPlayer5Y`: require an opposing player or team.
    pub fn is_vs_player(&self) -> bool {
        matches!(
            self,
            StatType::VsPlayer | StatType::VsPlayerTotal | StatType::VsPlayer5Y
        )
    }

    /// Play-by-play and pitch-by-pitch logs.
    pub fn is_log(&self) -> bool {
        matches!(self, StatType::PlayLog | StatType::PitchLog)
    }

    /// Date ranges are mandatory for these.
    pub fn needs_date_range(&self) -> bool {
        matches!(self, StatType::ByDateRange | StatType::ByDateRangeAdvanced)
    }
}

impl std::fmt::Display for StatType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for StatType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let all = [
            StatType::Season,
            StatType::SeasonAdvanced,
            StatType::Career,
            StatType::CareerAdvanced,
            StatType::YearByYear,
            StatType::YearByYearAdvanced,
            StatType::YearByYearPlayoffs,
            StatType::GameLog,
            StatType::ByDateRange,
            StatType::ByDateRangeAdvanced,
            StatType::StatSplits,
            StatType::StatSplitsAdvanced,
            StatType::VsPlayer,
            StatType::VsPlayerTotal,
            StatType::VsPlayer5Y,
            StatType::VsTeam,
            StatType::VsTeamTotal,
            StatType::VsTeam5Y,
            StatType::PlayLog,
            StatType::PitchLog,
        ];
        let needle = s.trim();
        all.into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(needle))
            .ok_or_else(|| format!("unknown stat type: {}", needle))
    }
}

/// Game type codes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GameType {
    /// S: spring training
    Spring,
    /// R: regular season
    Regular,
    /// F: wild card
    WildCard,
    /// D: division series
    Division,
    /// L: league championship series
    League,
    /// W: world series
    WorldSeries,
    /// C: championship
    Championship,
    /// P: any postseason
    Postseason,
    /// A: all-star game
    AllStar,
    /// E: exhibition
    Exhibition,
    /// I: intrasquad
    Intrasquad,
}

impl GameType {
    pub const ALL: [GameType; 11] = [
        GameType::Spring,
        GameType::Regular,
        GameType::WildCard,
        GameType::Division,
        GameType::League,
        GameType::WorldSeries,
        GameType::Championship,
        GameType::Postseason,
        GameType::AllStar,
        GameType::Exhibition,
        GameType::Intrasquad,
    ];

    /// Postseason rounds a team can appear in.
    pub const PLAYOFF_ROUNDS: [GameType; 4] = [
        GameType::WildCard,
        GameType::Division,
        GameType::League,
        GameType::WorldSeries,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            GameType::Spring => "S",
            GameType::Regular => "R",
            GameType::WildCard => "F",
            GameType::Division => "D",
            GameType::League => "L",
            GameType::WorldSeries => "W",
            GameType::Championship => "C",
            GameType::Postseason => "P",
            GameType::AllStar => "A",
            GameType::Exhibition => "E",
            GameType::Intrasquad => "I",
        }
    }

    /// Order used when sorting postseason appearances (deepest round last).
    pub fn sort_order(&self) -> u8 {
        match self {
            GameType::WildCard => 1,
            GameType::Division => 2,
            GameType::League => 3,
            GameType::WorldSeries => 4,
            _ => 0,
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            GameType::Spring => "Spring Training",
            GameType::Regular => "Regular Season",
            GameType::WildCard => "Wild Card Game",
            GameType::Division => "Division Series",
            GameType::League => "League Championship Series",
            GameType::WorldSeries => "World Series",
            GameType::Championship => "Championship",
            GameType::Postseason => "Playoffs",
            GameType::AllStar => "All-Star Game",
            GameType::Exhibition => "Exhibition",
            GameType::Intrasquad => "Intrasquad",
        }
    }
}

impl std::fmt::Display for GameType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for GameType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim().to_uppercase();
        GameType::ALL
            .into_iter()
            .find(|t| t.code() == code)
            .ok_or_else(|| format!("unknown game type: {}", s))
    }
}

/// Roster type, appended to `/teams/{id}/roster/`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum RosterType {
    #[default]
    Active,
    FortyMan,
    DepthChart,
    FullSeason,
    FullRoster,
    AllTime,
    Coach,
    Gameday,
    NonRosterInvitees,
}

impl RosterType {
    pub fn as_str(&self) -> &'static str {
        match self {
            RosterType::Active => "active",
            RosterType::FortyMan => "40Man",
            RosterType::DepthChart => "depthChart",
            RosterType::FullSeason => "fullSeason",
            RosterType::FullRoster => "fullRoster",
            RosterType::AllTime => "allTime",
            RosterType::Coach => "coach",
            RosterType::Gameday => "gameday",
            RosterType::NonRosterInvitees => "nonRosterInvitees",
        }
    }
}

impl std::fmt::Display for RosterType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for RosterType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let all = [
            RosterType::Active,
            RosterType::FortyMan,
            RosterType::DepthChart,
            RosterType::FullSeason,
            RosterType::FullRoster,
            RosterType::AllTime,
            RosterType::Coach,
            RosterType::Gameday,
            RosterType::NonRosterInvitees,
        ];
        let needle = s.trim();
        all.into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(needle))
            .ok_or_else(|| format!("unknown roster type: {}", needle))
    }
}

/// Player pool for league leader queries.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum PlayerPool {
    All,
    #[default]
    Qualified,
    Rookies,
    QualifiedRookies,
}

impl PlayerPool {
    pub fn as_str(&self) -> &'static str {
        match self {
            PlayerPool::All => "All",
            PlayerPool::Qualified => "Qualified",
            PlayerPool::Rookies => "Rookies",
            PlayerPool::QualifiedRookies => "Qualified_rookies",
        }
    }
}

impl std::fmt::Display for PlayerPool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for PlayerPool {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "all" => Ok(PlayerPool::All),
            "qualified" => Ok(PlayerPool::Qualified),
            "rookies" => Ok(PlayerPool::Rookies),
            "qualified_rookies" => Ok(PlayerPool::QualifiedRookies),
            other => Err(format!("unknown player pool: {}", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stat_type_parses_case_insensitively() {
        assert_eq!("yearbyyear".parse::<StatType>(), Ok(StatType::YearByYear));
        assert_eq!("vsPlayer5Y".parse::<StatType>(), Ok(StatType::VsPlayer5Y));
        assert!("nonsense".parse::<StatType>().is_err());
    }

    #[test]
    fn stat_type_flags() {
        assert!(StatType::CareerAdvanced.is_advanced());
        assert!(!StatType::Career.is_advanced());
        assert!(StatType::VsTeam5Y.is_vs_team());
        assert!(StatType::VsPlayerTotal.is_vs_player());
        assert!(StatType::PitchLog.is_log());
        assert!(StatType::ByDateRangeAdvanced.needs_date_range());
    }

    #[test]
    fn game_type_codes_round_trip_through_display() {
        for gt in GameType::ALL {
            assert_eq!(gt.to_string().parse::<GameType>(), Ok(gt));
        }
        assert_eq!("w".parse::<GameType>(), Ok(GameType::WorldSeries));
    }

    #[test]
    fn roster_type_uses_api_spelling() {
        assert_eq!(RosterType::FortyMan.to_string(), "40Man");
        assert_eq!("allTime".parse::<RosterType>(), Ok(RosterType::AllTime));
    }

    #[test]
    fn player_pool_default_is_qualified() {
        assert_eq!(PlayerPool::default().to_string(), "Qualified");
        assert_eq!("qualified_rookies".parse::<PlayerPool>(), Ok(PlayerPool::QualifiedRookies));
    }
}
