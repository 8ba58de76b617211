use super::{read_input, CurveSource, ShapeInput};
use lyon::geom::{point, vector, Angle, ArcFlags, SvgArc};
use medialcam_core::{CurveSegment, InputError, Point2D, ShapeCurves, ShapeError};
use regex::Regex;
use std::path::PathBuf;
use tracing::{debug, warn};

/// SVG document where every `<path>` element is one shape.
///
/// Coordinates are taken literally: no viewBox scaling, no transforms and no
/// Y mirroring.
#[derive(Debug, Clone)]
pub struct SvgCurveSource {
    path: PathBuf,
}

impl SvgCurveSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Parses document text.
    pub fn parse(&self, content: &str) -> Result<Vec<ShapeInput>, InputError> {
        if !content.contains("<svg") {
            return Err(InputError::Svg(format!(
                "{} has no <svg> element",
                self.path.display()
            )));
        }

        let re_path =
            Regex::new(r"<path\b([^>]*)>").map_err(|e| InputError::Svg(e.to_string()))?;
        let re_d = Regex::new(r#"(?:^|\s)d\s*=\s*["']([^"']*)["']"#)
            .map_err(|e| InputError::Svg(e.to_string()))?;
        let re_transform = Regex::new(r#"(?:^|\s)transform\s*="#)
            .map_err(|e| InputError::Svg(e.to_string()))?;

        let mut shapes = Vec::new();
        for (index, cap) in re_path.captures_iter(content).enumerate() {
            let attrs = &cap[1];
            if re_transform.is_match(attrs) {
                warn!("Path {}: transform attribute ignored", index);
            }
            let shape = match re_d.captures(attrs) {
                Some(d) => parse_path_data(&d[1])
                    .map(ShapeCurves::new)
                    .map_err(ShapeError::malformed_input),
                None => Err(ShapeError::malformed_input("path element has no d attribute")),
            };
            if let Err(err) = &shape {
                warn!("Path {}: {}", index, err);
            }
            shapes.push(shape);
        }

        if shapes.is_empty() {
            return Err(InputError::Empty(self.path.display().to_string()));
        }
        debug!("Loaded {} paths from {}", shapes.len(), self.path.display());
        Ok(shapes)
    }
}

impl CurveSource for SvgCurveSource {
    fn load(&self) -> Result<Vec<ShapeInput>, InputError> {
        let content = read_input(&self.path)?;
        self.parse(&content)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Token {
    Command(char),
    Number(f64),
}

fn is_command(c: char) -> bool {
    matches!(
        c,
        'M' | 'm' | 'L' | 'l' | 'H' | 'h' | 'V' | 'v' | 'C' | 'c' | 'S' | 's' | 'Q' | 'q' | 'T'
            | 't' | 'A' | 'a' | 'Z' | 'z'
    )
}

/// Splits path data into commands and numbers. Handles `1-2`, `.5.5` and
/// exponents.
fn tokenize(data: &str) -> Result<Vec<Token>, String> {
    let chars: Vec<char> = data.chars().collect();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        if c.is_whitespace() || c == ',' {
            i += 1;
        } else if is_command(c) {
            tokens.push(Token::Command(c));
            i += 1;
        } else if c.is_ascii_digit() || matches!(c, '.' | '+' | '-') {
            let start = i;
            if matches!(c, '+' | '-') {
                i += 1;
            }
            let mut seen_dot = false;
            let mut seen_digit = false;
            while i < chars.len() {
                let ch = chars[i];
                if ch.is_ascii_digit() {
                    seen_digit = true;
                } else if ch == '.' && !seen_dot {
                    seen_dot = true;
                } else {
                    break;
                }
                i += 1;
            }
            if i < chars.len() && matches!(chars[i], 'e' | 'E') {
                let mut j = i + 1;
                if j < chars.len() && matches!(chars[j], '+' | '-') {
                    j += 1;
                }
                if j < chars.len() && chars[j].is_ascii_digit() {
                    i = j;
                    while i < chars.len() && chars[i].is_ascii_digit() {
                        i += 1;
                    }
                }
            }
            let text: String = chars[start..i].iter().collect();
            if !seen_digit {
                return Err(format!("invalid number '{}'", text));
            }
            let value = text
                .parse::<f64>()
                .map_err(|_| format!("invalid number '{}'", text))?;
            tokens.push(Token::Number(value));
        } else {
            return Err(format!("unexpected character '{}' in path data", c));
        }
    }
    Ok(tokens)
}

fn numbers<const N: usize>(
    tokens: &[Token],
    i: &mut usize,
    command: char,
) -> Result<[f64; N], String> {
    let mut out = [0.0; N];
    for slot in out.iter_mut() {
        match tokens.get(*i) {
            Some(Token::Number(v)) => *slot = *v,
            _ => return Err(format!("command '{}' expects {} numbers", command, N)),
        }
        *i += 1;
    }
    Ok(out)
}

fn reflect(ctrl: Option<Point2D>, about: Point2D) -> Point2D {
    match ctrl {
        Some(c) => about + (about - c),
        None => about,
    }
}

/// Converts SVG path data into cubic segments.
///
/// Lines become cubics with control points at thirds, quadratics are
/// elevated exactly and elliptical arcs are approximated by cubics. A
/// `Z` that is away from the subpath start closes with a line.
pub fn parse_path_data(data: &str) -> Result<Vec<CurveSegment>, String> {
    let tokens = tokenize(data)?;
    if tokens.is_empty() {
        return Err("empty path data".to_string());
    }

    let mut segments = Vec::new();
    let mut current = Point2D::new(0.0, 0.0);
    let mut start = current;
    let mut last_cubic: Option<Point2D> = None;
    let mut last_quad: Option<Point2D> = None;
    let mut command: Option<char> = None;
    let mut i = 0;

    while i < tokens.len() {
        if let Token::Command(c) = tokens[i] {
            if command.is_none() && !matches!(c, 'M' | 'm') {
                return Err(format!("path data must start with a move, found '{}'", c));
            }
            command = Some(c);
            i += 1;
            if matches!(c, 'Z' | 'z') {
                if current != start {
                    segments.push(CurveSegment::line(current, start));
                }
                current = start;
                last_cubic = None;
                last_quad = None;
                continue;
            }
        }

        let Some(c) = command else {
            return Err("path data must start with a move command".to_string());
        };
        let relative = c.is_ascii_lowercase();
        let base = if relative {
            current
        } else {
            Point2D::new(0.0, 0.0)
        };
        let at = |x: f64, y: f64| Point2D::new(base.x + x, base.y + y);

        let mut cubic_ctrl = None;
        let mut quad_ctrl = None;
        match c.to_ascii_uppercase() {
            'M' => {
                let [x, y] = numbers::<2>(&tokens, &mut i, c)?;
                current = at(x, y);
                start = current;
                // Further coordinate pairs are implicit line-tos
                command = Some(if relative { 'l' } else { 'L' });
            }
            'L' => {
                let [x, y] = numbers::<2>(&tokens, &mut i, c)?;
                let to = at(x, y);
                segments.push(CurveSegment::line(current, to));
                current = to;
            }
            'H' => {
                let [x] = numbers::<1>(&tokens, &mut i, c)?;
                let to = Point2D::new(base.x + x, current.y);
                segments.push(CurveSegment::line(current, to));
                current = to;
            }
            'V' => {
                let [y] = numbers::<1>(&tokens, &mut i, c)?;
                let to = Point2D::new(current.x, base.y + y);
                segments.push(CurveSegment::line(current, to));
                current = to;
            }
            'C' => {
                let [x1, y1, x2, y2, x, y] = numbers::<6>(&tokens, &mut i, c)?;
                let (c1, c2, to) = (at(x1, y1), at(x2, y2), at(x, y));
                segments.push(CurveSegment::new(current, c1, c2, to));
                cubic_ctrl = Some(c2);
                current = to;
            }
            'S' => {
                let [x2, y2, x, y] = numbers::<4>(&tokens, &mut i, c)?;
                let c1 = reflect(last_cubic, current);
                let (c2, to) = (at(x2, y2), at(x, y));
                segments.push(CurveSegment::new(current, c1, c2, to));
                cubic_ctrl = Some(c2);
                current = to;
            }
            'Q' => {
                let [x1, y1, x, y] = numbers::<4>(&tokens, &mut i, c)?;
                let (q, to) = (at(x1, y1), at(x, y));
                segments.push(CurveSegment::from_quadratic(current, q, to));
                quad_ctrl = Some(q);
                current = to;
            }
            'T' => {
                let [x, y] = numbers::<2>(&tokens, &mut i, c)?;
                let q = reflect(last_quad, current);
                let to = at(x, y);
                segments.push(CurveSegment::from_quadratic(current, q, to));
                quad_ctrl = Some(q);
                current = to;
            }
            'A' => {
                let [rx, ry, rotation, large_arc, sweep, x, y] =
                    numbers::<7>(&tokens, &mut i, c)?;
                let to = at(x, y);
                push_arc(&mut segments, current, to, rx, ry, rotation, large_arc, sweep);
                current = to;
            }
            _ => return Err(format!("numbers after close command '{}'", c)),
        }
        last_cubic = cubic_ctrl;
        last_quad = quad_ctrl;
    }

    if segments.is_empty() {
        return Err("path has no drawable segments".to_string());
    }
    Ok(segments)
}

#[allow(clippy::too_many_arguments)]
fn push_arc(
    segments: &mut Vec<CurveSegment>,
    from: Point2D,
    to: Point2D,
    rx: f64,
    ry: f64,
    rotation: f64,
    large_arc: f64,
    sweep: f64,
) {
    if from == to {
        return;
    }
    let arc = SvgArc {
        from: point(from.x, from.y),
        to: point(to.x, to.y),
        radii: vector(rx.abs(), ry.abs()),
        x_rotation: Angle::degrees(rotation),
        flags: ArcFlags {
            large_arc: large_arc != 0.0,
            sweep: sweep != 0.0,
        },
    };
    if arc.is_straight_line() {
        segments.push(CurveSegment::line(from, to));
        return;
    }

    let first = segments.len();
    arc.to_arc().for_each_cubic_bezier(&mut |cubic| {
        segments.push(CurveSegment::new(
            Point2D::new(cubic.from.x, cubic.from.y),
            Point2D::new(cubic.ctrl1.x, cubic.ctrl1.y),
            Point2D::new(cubic.ctrl2.x, cubic.ctrl2.y),
            Point2D::new(cubic.to.x, cubic.to.y),
        ));
    });
    // Pin the ends so consecutive segments join exactly
    if let Some(seg) = segments.get_mut(first) {
        seg.points[0] = from;
    }
    if let Some(seg) = segments.last_mut() {
        seg.points[3] = to;
    }
}
