//! Square grid of intersections and the flood fills that analyse it.
//!
//! A [`Grid`] is a plain value: cloning it yields an independent copy, and two
//! grids compare equal exactly when they hold the same stones. The board
//! engine leans on both properties for tentative placement and ko checks.
//!
//! Groups and liberties are recomputed from scratch on every query. Boards are
//! at most 25x25, so a full flood fill per move is cheap.

use std::fmt;

use crate::constants::COLUMN_LETTERS;

/// Stone color.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Color {
    Black,
    White,
}

impl Color {
    /// The other player.
    pub fn opponent(self) -> Color {
        match self {
            Color::Black => Color::White,
            Color::White => Color::Black,
        }
    }

    /// Stable index for per-color tables (`Black = 0`, `White = 1`).
    pub(crate) fn index(self) -> usize {
        match self {
            Color::Black => 0,
            Color::White => 1,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::Black => f.write_str("black"),
            Color::White => f.write_str("white"),
        }
    }
}

/// An intersection as `(x, y)`, with `(0, 0)` the top-left corner.
pub type Point = (usize, usize);

/// A maximal connected area of empty intersections.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Region {
    pub points: Vec<Point>,
    pub touches_black: bool,
    pub touches_white: bool,
}

impl Region {
    /// The color that owns this region, if it borders exactly one color.
    pub fn owner(&self) -> Option<Color> {
        match (self.touches_black, self.touches_white) {
            (true, false) => Some(Color::Black),
            (false, true) => Some(Color::White),
            _ => None,
        }
    }
}

/// The stones on a square board.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Grid {
    size: usize,
    cells: Vec<Option<Color>>,
}

impl Grid {
    pub fn new(size: usize) -> Self {
        Self {
            size,
            cells: vec![None; size * size],
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    fn idx(&self, (x, y): Point) -> usize {
        y * self.size + x
    }

    /// Whether `pt` lies on the board.
    pub fn contains(&self, (x, y): Point) -> bool {
        x < self.size && y < self.size
    }

    /// Stone at `pt`. Off-board points read as empty.
    pub fn get(&self, pt: Point) -> Option<Color> {
        if !self.contains(pt) {
            return None;
        }
        self.cells[self.idx(pt)]
    }

    pub(crate) fn set(&mut self, pt: Point, stone: Option<Color>) {
        let i = self.idx(pt);
        self.cells[i] = stone;
    }

    /// Clear every listed point.
    pub(crate) fn remove_all(&mut self, points: &[Point]) {
        for &pt in points {
            self.set(pt, None);
        }
    }

    /// All intersections in row-major order.
    pub fn points(&self) -> impl Iterator<Item = Point> + '_ {
        let s = self.size;
        (0..s).flat_map(move |y| (0..s).map(move |x| (x, y)))
    }

    /// Orthogonal on-board neighbors of `pt`.
    pub fn neighbors(&self, (x, y): Point) -> impl Iterator<Item = Point> + '_ {
        let s = self.size;
        let mut v = Vec::with_capacity(4);
        if x > 0 {
            v.push((x - 1, y));
        }
        if x + 1 < s {
            v.push((x + 1, y));
        }
        if y > 0 {
            v.push((x, y - 1));
        }
        if y + 1 < s {
            v.push((x, y + 1));
        }
        v.into_iter()
    }

    /// Number of stones of `color` on the grid.
    pub fn count(&self, color: Color) -> usize {
        self.cells.iter().filter(|&&c| c == Some(color)).count()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(Option::is_none)
    }

    /// Flood fill over 4-connected intersections holding the same content as `start`.
    fn flood(&self, start: Point) -> Vec<Point> {
        let content = self.get(start);
        let mut stack = vec![start];
        let mut visited = vec![false; self.size * self.size];
        let mut out = Vec::new();
        while let Some(pt) = stack.pop() {
            let i = self.idx(pt);
            if visited[i] {
                continue;
            }
            visited[i] = true;
            out.push(pt);
            for n in self.neighbors(pt) {
                if !visited[self.idx(n)] && self.get(n) == content {
                    stack.push(n);
                }
            }
        }
        out
    }

    /// The group containing the stone at `pt`. Empty if `pt` holds no stone.
    pub fn group(&self, pt: Point) -> Vec<Point> {
        if self.get(pt).is_none() {
            return Vec::new();
        }
        self.flood(pt)
    }

    /// Distinct empty intersections adjacent to any stone of `group`.
    pub fn liberties(&self, group: &[Point]) -> usize {
        let mut seen = vec![false; self.size * self.size];
        let mut libs = 0;
        for &pt in group {
            for n in self.neighbors(pt) {
                let i = self.idx(n);
                if self.get(n).is_none() && !seen[i] {
                    seen[i] = true;
                    libs += 1;
                }
            }
        }
        libs
    }

    /// Liberties of the group containing `pt`.
    pub fn group_liberties(&self, pt: Point) -> usize {
        self.liberties(&self.group(pt))
    }

    /// Every connected empty area together with the colors bordering it.
    pub fn empty_regions(&self) -> Vec<Region> {
        let mut assigned = vec![false; self.size * self.size];
        let mut regions = Vec::new();
        for pt in self.points() {
            if self.get(pt).is_some() || assigned[self.idx(pt)] {
                continue;
            }
            let points = self.flood(pt);
            let mut touches_black = false;
            let mut touches_white = false;
            for &p in &points {
                assigned[self.idx(p)] = true;
                for n in self.neighbors(p) {
                    match self.get(n) {
                        Some(Color::Black) => touches_black = true,
                        Some(Color::White) => touches_white = true,
                        None => {}
                    }
                }
            }
            regions.push(Region {
                points,
                touches_black,
                touches_white,
            });
        }
        regions
    }

    /// Whether some group on the grid has no liberties. Never true on a legal board.
    pub fn has_dead_group(&self) -> bool {
        let mut checked = vec![false; self.size * self.size];
        for pt in self.points() {
            if self.get(pt).is_none() || checked[self.idx(pt)] {
                continue;
            }
            let group = self.group(pt);
            for &p in &group {
                checked[self.idx(p)] = true;
            }
            if self.liberties(&group) == 0 {
                return true;
            }
        }
        false
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let header: String = COLUMN_LETTERS
            .iter()
            .take(self.size)
            .map(|&c| format!("{} ", c as char))
            .collect();
        writeln!(f, "   {}", header.trim_end())?;
        for y in 0..self.size {
            write!(f, "{:>2}", self.size - y)?;
            for x in 0..self.size {
                let ch = match self.get((x, y)) {
                    Some(Color::Black) => 'X',
                    Some(Color::White) => 'O',
                    None => '.',
                };
                write!(f, " {ch}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
