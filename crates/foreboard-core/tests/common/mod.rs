#![allow(dead_code)]

use foreboard_core::{enrich, ParsedWorkbook};
use foreboard_parser::{parse_date, to_epoch_days, CourseColumns, ScoreColumns};
use polars::prelude::DataFrame;

pub struct Hole {
    pub golfer: &'static str,
    pub date: &'static str,
    pub course: &'static str,
    pub tee: &'static str,
    pub hole: i64,
    pub score: i64,
    pub putts: i64,
    pub tee_accuracy: Option<&'static str>,
}

pub fn hole(
    golfer: &'static str,
    date: &'static str,
    course: &'static str,
    hole: i64,
    score: i64,
    putts: i64,
    tee_accuracy: Option<&'static str>,
) -> Hole {
    Hole {
        golfer,
        date,
        course,
        tee: "Blue",
        hole,
        score,
        putts,
        tee_accuracy,
    }
}

pub fn workbook(holes: &[Hole], pars: &[(&str, &str, i64, i64)]) -> ParsedWorkbook {
    let mut scores = ScoreColumns::with_capacity(holes.len());
    for entry in holes {
        scores.golfer.push(entry.golfer.to_string());
        let date = parse_date(entry.date).expect("fixture date");
        scores.date.push(to_epoch_days(date));
        scores.course.push(entry.course.to_string());
        scores.tee.push(entry.tee.to_string());
        scores.hole.push(entry.hole);
        scores.score.push(entry.score);
        scores.putts.push(entry.putts);
        scores.tee_accuracy.push(entry.tee_accuracy.map(str::to_string));
        scores.approach_accuracy.push(Some("H".to_string()));
    }

    let mut courses = CourseColumns::with_capacity(pars.len());
    for (course, tee, hole, par) in pars {
        courses.course.push(course.to_string());
        courses.tee.push(tee.to_string());
        courses.hole.push(*hole);
        courses.par.push(*par);
    }

    ParsedWorkbook {
        scores: scores.into_frame().expect("scores frame"),
        courses: courses.into_frame().expect("courses frame"),
    }
}

pub fn enriched(holes: &[Hole], pars: &[(&str, &str, i64, i64)]) -> DataFrame {
    enrich(&workbook(holes, pars)).expect("enrichment succeeded")
}

/// Par 4 then par 3 at course X and course Y, blue tees.
pub fn standard_pars() -> Vec<(&'static str, &'static str, i64, i64)> {
    vec![
        ("X", "Blue", 1, 4),
        ("X", "Blue", 2, 3),
        ("Y", "Blue", 1, 5),
        ("Y", "Blue", 2, 4),
    ]
}

/// Three golfers' worth of rounds spread over four dates, two rounds on 2023-03-01.
pub fn season() -> DataFrame {
    enriched(
        &[
            hole("A", "2023-01-01", "X", 1, 5, 2, Some("H")),
            hole("A", "2023-01-01", "X", 2, 4, 1, None),
            hole("A", "2023-02-01", "Y", 1, 6, 2, Some("L")),
            hole("A", "2023-02-01", "Y", 2, 4, 2, Some("H")),
            hole("B", "2023-03-01", "X", 1, 4, 2, Some("R")),
            hole("B", "2023-03-01", "X", 2, 3, 2, None),
            hole("A", "2023-03-01", "Y", 1, 5, 1, Some("H")),
            hole("A", "2023-03-01", "Y", 2, 5, 3, Some("R")),
            hole("C", "2023-04-01", "X", 1, 7, 3, Some("L")),
            hole("C", "2023-04-01", "X", 2, 3, 1, None),
        ],
        &standard_pars(),
    )
}
