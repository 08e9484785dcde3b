//! Sample RINEX content shared by unit tests

/// Format one header line: value padded to 60 columns, then the label
pub fn header_line(value: &str, label: &str) -> String {
    format!("{:<60}{}\n", value, label)
}

pub fn observation_header() -> String {
    [
        header_line(
            "     2.11           OBSERVATION DATA    M (MIXED)",
            "RINEX VERSION / TYPE",
        ),
        header_line(
            "teqc  2016Apr1      GA                  20160507 00:00:00UTC",
            "PGM / RUN BY / DATE",
        ),
        header_line("ALIC", "MARKER NAME"),
        header_line("50137M001", "MARKER NUMBER"),
        header_line(
            "5249K43695          TRIMBLE NETR9       5.10",
            "REC # / TYPE / VERS",
        ),
        header_line("1441112501          TRM59800.00     NONE", "ANT # / TYPE"),
        header_line(
            "  -4052052.7340  4212836.0150 -2545105.1610",
            "APPROX POSITION XYZ",
        ),
        header_line(
            "        0.1234        0.0010       -0.0020",
            "ANTENNA: DELTA H/E/N",
        ),
        header_line("", "END OF HEADER"),
    ]
    .concat()
}

pub fn navigation_header() -> String {
    [
        header_line(
            "     2.11           N: GPS NAV DATA",
            "RINEX VERSION / TYPE",
        ),
        header_line(
            "teqc  2016Apr1      GA                  20160507 00:00:00UTC",
            "PGM / RUN BY / DATE",
        ),
        header_line("", "END OF HEADER"),
    ]
    .concat()
}

pub fn meteorological_header() -> String {
    [
        header_line(
            "     2.11           METEOROLOGICAL DATA",
            "RINEX VERSION / TYPE",
        ),
        header_line("ALIC", "MARKER NAME"),
        header_line("50137M001", "MARKER NUMBER"),
        header_line("     3    PR    TD    HR", "# / TYPES OF OBSERV"),
        header_line(
            &format!("{:<20}{:<20}{:6}{:>7.1}{:4}PR", "PAROSCIENTIFIC", "6016B", "", 0.1, ""),
            "SENSOR MOD/TYPE/ACC",
        ),
        header_line(
            &format!("{:<20}{:<20}{:6}{:>7.1}{:4}TD", "VAISALA", "HMP45", "", 0.1, ""),
            "SENSOR MOD/TYPE/ACC",
        ),
        header_line(
            &format!(
                "{:>14.4}{:>14.4}{:>14.4}{:>14.4} PR",
                -4052052.734, 4212836.015, -2545105.161, 603.2
            ),
            "SENSOR POS XYZ/H",
        ),
        header_line(
            &format!("{:>14.4}{:>14.4}{:>14.4}{:>14.4} TD", 0.0, 0.0, 0.0, 602.0),
            "SENSOR POS XYZ/H",
        ),
        header_line("", "END OF HEADER"),
    ]
    .concat()
}

/// Append a few data records after a header
pub fn with_body(header: &str) -> String {
    format!(
        "{}{}",
        header,
        " 1 16  5  7  0  0  0.0 0.247578623891D-04-0.181898940355D-11 0.000000000000D+00\n"
    )
}

/// Drop every line whose label equals `label`
pub fn without_label(content: &str, label: &str) -> String {
    content
        .lines()
        .filter(|line| line.get(60..).map(str::trim) != Some(label))
        .map(|line| format!("{}\n", line))
        .collect()
}
