//! Console text: prompts, result lines and colors

use std::io::{self, BufRead, Write};

use gradebook::{AverageOutcome, GradebookError, HeaderInfo, Severity, SubjectSummary, Tier, TierTally};

const RESET: &str = "\x1b[0m";

pub const FILE_PROMPT: &str = "Введите имя файла (например, example.xlsx): ";
pub const CHART_PROMPT: &str =
    "График изменения среднего балла какого предмета нарисовать (если не надо рисовать, то нажмите enter) ";
pub const INTRO: &str = "Положите файл с оценками (.xlsx) в папку с данными и укажите его имя";

/// ANSI styling that can be switched off
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    enabled: bool,
}

impl Palette {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    fn code(severity: Severity) -> &'static str {
        match severity {
            Severity::Green => "\x1b[1;92m",
            Severity::Yellow => "\x1b[1;93m",
            Severity::Red => "\x1b[1;91m",
            Severity::Gray => "\x1b[1;90m",
        }
    }

    pub fn paint(&self, text: &str, severity: Severity) -> String {
        if self.enabled {
            format!("{}{}{}", Self::code(severity), text, RESET)
        } else {
            text.to_string()
        }
    }

    /// Text of an error message
    pub fn error(&self, text: &str) -> String {
        if self.enabled {
            format!("\x1b[31m{}{}", text, RESET)
        } else {
            text.to_string()
        }
    }
}

/// Print `prompt` and read one trimmed line; end of input reads as empty
pub fn prompt(prompt: &str) -> io::Result<String> {
    let mut stdout = io::stdout().lock();
    stdout.write_all(prompt.as_bytes())?;
    stdout.flush()?;

    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim().to_string())
}

/// Scores print with at least one decimal: `4.0`, `4.71`
pub fn format_score(score: f64) -> String {
    let text = score.to_string();
    if text.contains('.') {
        text
    } else {
        format!("{}.0", text)
    }
}

pub fn header_lines(header: &HeaderInfo) -> Vec<String> {
    header
        .iter()
        .map(|(key, value)| format!("{}: {}", key, value.unwrap_or_default()))
        .collect()
}

/// `<subject> - <average> ~ <band>` with the variants for missing marks
pub fn subject_line(summary: &SubjectSummary, palette: Palette) -> String {
    let avg = match &summary.outcome {
        AverageOutcome::NoMarks => return format!("{} - нет оценок", summary.subject),
        AverageOutcome::Average(avg) => avg,
    };

    let score = format_score(avg.score);
    match summary.shortfall {
        Some(missing) => format!(
            "{} - {} ~ {} (не хватает {} оценок)",
            summary.subject, score, avg.band, missing
        ),
        None => format!(
            "{} - {} ~ {}",
            summary.subject,
            score,
            palette.paint(&avg.band.to_string(), avg.tier.severity())
        ),
    }
}

pub fn overall_line(overall: Option<f64>, palette: Palette) -> String {
    let value = match overall {
        Some(score) => palette.paint(&format_score(score), Tier::classify(score).severity()),
        None => "нет оценок".to_string(),
    };
    format!("Среднее всех средних баллов - {}", value)
}

pub fn tally_line(tally: &TierTally) -> String {
    format!(
        "Итого: {} пятёрок; {} четверок; {} троек; {} двоек; {} единиц; не хватает оценок у {} предметов",
        tally.count(Tier::Five),
        tally.count(Tier::Four),
        tally.count(Tier::Three),
        tally.count(Tier::Two),
        tally.count(Tier::One),
        tally.short()
    )
}

/// Message shown to the user for a report error
pub fn describe_error(err: &GradebookError) -> String {
    match err {
        GradebookError::InvalidFileName(_) => {
            "Файл нечитаем, должно быть расширение .xlsx".to_string()
        }
        GradebookError::NotFound { file, dir } => {
            format!("Файл {} не найден в папке {}", file, dir.display())
        }
        GradebookError::UnknownSubject(_) => "Указан несуществующий предмет".to_string(),
        GradebookError::InsufficientData { .. } => {
            "Слишком мало оценок для отрисовки графика".to_string()
        }
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gradebook::FinalAverage;
    use pretty_assertions::assert_eq;

    fn summary(outcome: AverageOutcome, shortfall: Option<usize>) -> SubjectSummary {
        SubjectSummary {
            ordinal: 1,
            subject: "Математика".to_string(),
            mark_count: 3,
            outcome,
            shortfall,
        }
    }

    fn average(score: f64, band: u8, tier: Tier) -> AverageOutcome {
        AverageOutcome::Average(FinalAverage {
            score,
            band,
            tier,
            count: 3,
        })
    }

    #[test]
    fn test_format_score() {
        assert_eq!(format_score(4.0), "4.0");
        assert_eq!(format_score(4.71), "4.71");
        assert_eq!(format_score(3.5), "3.5");
    }

    #[test]
    fn test_subject_lines() {
        let plain = Palette::new(false);
        assert_eq!(
            subject_line(&summary(average(4.71, 5, Tier::Five), None), plain),
            "Математика - 4.71 ~ 5"
        );
        assert_eq!(
            subject_line(&summary(average(4.0, 4, Tier::Four), Some(2)), plain),
            "Математика - 4.0 ~ 4 (не хватает 2 оценок)"
        );
        assert_eq!(
            subject_line(&summary(AverageOutcome::NoMarks, Some(3)), plain),
            "Математика - нет оценок"
        );
    }

    #[test]
    fn test_colored_band() {
        let line = subject_line(
            &summary(average(3.2, 3, Tier::Three), None),
            Palette::new(true),
        );
        assert_eq!(line, "Математика - 3.2 ~ \x1b[1;91m3\x1b[0m");
    }

    #[test]
    fn test_overall_line() {
        assert_eq!(
            overall_line(Some(4.23), Palette::new(false)),
            "Среднее всех средних баллов - 4.23"
        );
        assert_eq!(
            overall_line(Some(4.6), Palette::new(true)),
            "Среднее всех средних баллов - \x1b[1;92m4.6\x1b[0m"
        );
        assert_eq!(
            overall_line(None, Palette::new(true)),
            "Среднее всех средних баллов - нет оценок"
        );
    }

    #[test]
    fn test_tally_line() {
        assert_eq!(
            tally_line(&TierTally::default()),
            "Итого: 0 пятёрок; 0 четверок; 0 троек; 0 двоек; 0 единиц; не хватает оценок у 0 предметов"
        );
    }

    #[test]
    fn test_header_lines() {
        let mut header = HeaderInfo::new();
        header.insert("Класс", Some("7Б".to_string()));
        header.insert("Период", None);
        assert_eq!(header_lines(&header), vec!["Класс: 7Б", "Период: "]);
    }

    #[test]
    fn test_describe_error() {
        assert_eq!(
            describe_error(&GradebookError::InvalidFileName("a.csv".into())),
            "Файл нечитаем, должно быть расширение .xlsx"
        );
        assert_eq!(
            describe_error(&GradebookError::UnknownSubject("Пение".into())),
            "Указан несуществующий предмет"
        );
        assert_eq!(
            describe_error(&GradebookError::NoWorksheet),
            "Workbook has no worksheets"
        );
    }
}
