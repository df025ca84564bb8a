//! Overall quality score.
//!
//! `score = clamp(1 − issue_penalty·issues − solid_penalty·solid_hits − style_penalty·style_hits, 0, 1)`
//!
//! A "hit" is an entry whose text contains any negative marker of its set
//! (case-insensitive substring). Markers are phrases of the language the model
//! answers in, so a change in model phrasing silently changes scores. Parser
//! sentinels are worded to match no marker.

use crate::models::{Issue, SolidReport, StyleReport};

/// Penalties and marker phrases used by [`overall_score`].
#[derive(Debug, Clone, PartialEq)]
pub struct ScoringConfig {
    pub issue_penalty: f64,
    pub solid_penalty: f64,
    pub style_penalty: f64,
    /// Lowercase phrases marking a violated SOLID principle.
    pub solid_markers: Vec<String>,
    /// Lowercase phrases marking a poor style aspect.
    pub style_markers: Vec<String>,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            issue_penalty: 0.1,
            solid_penalty: 0.1,
            style_penalty: 0.05,
            solid_markers: vec!["не соответствует".into()],
            style_markers: vec!["плохо".into(), "отсутствует".into()],
        }
    }
}

/// Combines parsed answers into a score in `0.0..=1.0`.
pub fn overall_score(
    style: &StyleReport,
    solid: &SolidReport,
    issues: &[Issue],
    cfg: &ScoringConfig,
) -> f64 {
    let solid_hits = count_hits(solid.entries().iter().map(|(_, t)| *t), &cfg.solid_markers);
    let style_hits = count_hits(style.entries().iter().map(|(_, t)| *t), &cfg.style_markers);

    let penalty = cfg.issue_penalty * issues.len() as f64
        + cfg.solid_penalty * solid_hits as f64
        + cfg.style_penalty * style_hits as f64;

    (1.0 - penalty).clamp(0.0, 1.0)
}

/// Number of texts containing at least one marker.
fn count_hits<'a>(texts: impl Iterator<Item = &'a str>, markers: &[String]) -> usize {
    texts
        .filter(|t| {
            let lower = t.to_lowercase();
            markers.iter().any(|m| lower.contains(&m.to_lowercase()))
        })
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::sentinels::PARSE_ERROR;
    use crate::parser::{parse_solid, parse_style};

    fn style(text: &str) -> StyleReport {
        StyleReport::from_values(std::array::from_fn(|_| text.to_string()))
    }

    fn solid(text: &str) -> SolidReport {
        SolidReport::from_values(std::array::from_fn(|_| text.to_string()))
    }

    fn issues(n: usize) -> Vec<Issue> {
        (0..n)
            .map(|_| Issue {
                kind: String::new(),
                description: String::new(),
                line: String::new(),
                recommendation: String::new(),
            })
            .collect()
    }

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn two_issues_with_clean_texts_score_point_eight() {
        let s = overall_score(
            &style("хорошо"),
            &solid("соответствует"),
            &issues(2),
            &ScoringConfig::default(),
        );
        assert!(approx(s, 0.8), "got {s}");
    }

    #[test]
    fn markers_are_case_insensitive() {
        let mut sr = solid("соответствует");
        sr.srp = "Не Соответствует: класс делает слишком много".into();
        let mut st = style("хорошо");
        st.documentation = "ПЛОХО, docstring отсутствует".into();

        let s = overall_score(&st, &sr, &[], &ScoringConfig::default());
        // one SOLID hit, one style hit (counted once despite two markers)
        assert!(approx(s, 1.0 - 0.1 - 0.05), "got {s}");
    }

    #[test]
    fn score_is_clamped_to_unit_interval() {
        let cfg = ScoringConfig::default();
        let worst = overall_score(&style("плохо"), &solid("не соответствует"), &issues(30), &cfg);
        assert_eq!(worst, 0.0);

        let best = overall_score(&style("хорошо"), &solid("соответствует"), &[], &cfg);
        assert_eq!(best, 1.0);
    }

    #[test]
    fn score_stays_in_bounds_for_all_small_combinations() {
        let cfg = ScoringConfig::default();
        for n in 0..15 {
            for solid_bad in 0..=5 {
                for style_bad in 0..=4 {
                    let mut sr = solid("соответствует");
                    let texts: [&mut String; 5] =
                        [&mut sr.srp, &mut sr.ocp, &mut sr.lsp, &mut sr.isp, &mut sr.dip];
                    for t in texts.into_iter().take(solid_bad) {
                        *t = "не соответствует".into();
                    }
                    let mut st = style("хорошо");
                    let texts: [&mut String; 4] = [
                        &mut st.formatting,
                        &mut st.naming,
                        &mut st.documentation,
                        &mut st.structure,
                    ];
                    for t in texts.into_iter().take(style_bad) {
                        *t = "плохо".into();
                    }
                    let s = overall_score(&st, &sr, &issues(n), &cfg);
                    assert!((0.0..=1.0).contains(&s));
                }
            }
        }
    }

    #[test]
    fn parser_sentinels_are_not_penalized() {
        let cfg = ScoringConfig::default();
        let clean_solid = parse_solid(
            r#"{"SRP":"соответствует","OCP":"соответствует","LSP":"соответствует","ISP":"соответствует","DIP":"соответствует"}"#,
        )
        .value;

        let partial = overall_score(
            &parse_style(r#"{"formatting":"хорошо"}"#).value,
            &clean_solid,
            &[],
            &cfg,
        );
        let garbage = overall_score(&parse_style("garbage").value, &clean_solid, &[], &cfg);
        assert_eq!(partial, 1.0);
        assert_eq!(partial, garbage);

        let partial_solid = parse_solid(r#"{"SRP":"соответствует"}"#).value;
        let s = overall_score(&style("хорошо"), &partial_solid, &[], &cfg);
        assert_eq!(s, 1.0);

        let s = overall_score(&style(PARSE_ERROR), &solid(PARSE_ERROR), &[], &cfg);
        assert_eq!(s, 1.0);
    }
}
