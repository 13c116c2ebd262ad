use crate::config::{GridConfig, Neighborhood};
use crate::error::{Error, Result};
use core::fmt;
use grid_util::point::Point;
use log::info;
use petgraph::unionfind::UnionFind;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use smallvec::SmallVec;

/// Orthogonal offsets in lookup order: west, east, south, north.
const ORTHOGONAL: [(i32, i32); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];
const DIAGONAL: [(i32, i32); 4] = [(-1, -1), (1, -1), (-1, 1), (1, 1)];

/// A single tile. Position and obstacle flag are fixed once the grid is built; only the
/// display annotation changes afterwards.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cell {
    position: Point,
    is_obstacle: bool,
    display_cost: Option<i32>,
}

impl Cell {
    pub fn position(&self) -> Point {
        self.position
    }
    pub fn is_obstacle(&self) -> bool {
        self.is_obstacle
    }
    /// Running cost written by the most recent search, if any.
    pub fn display_cost(&self) -> Option<i32> {
        self.display_cost
    }
}

/// [GridField] owns a dense, gap-free array of [Cell]s covering `[0, width) x [0, height)`.
/// Connected components are computed once at construction using a [UnionFind] over the
/// configured [Neighborhood], which makes reachability queries cheap without running a
/// search.
#[derive(Clone, Debug)]
pub struct GridField {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
    neighborhood: Neighborhood,
    allow_corner_cutting: bool,
    components: UnionFind<usize>,
}

fn index_of(width: usize, height: usize, point: Point) -> Result<usize> {
    if point.x >= 0 && point.y >= 0 && (point.x as usize) < width && (point.y as usize) < height
    {
        Ok(point.y as usize * width + point.x as usize)
    } else {
        Err(Error::OutOfBounds {
            x: point.x,
            y: point.y,
            width,
            height,
        })
    }
}

/// Number of cells in a `width x height` grid. Zero or overflowing sizes are rejected.
fn cell_count(width: usize, height: usize) -> Result<usize> {
    match width.checked_mul(height) {
        Some(count) if count > 0 => Ok(count),
        _ => Err(Error::InvalidDimensions { width, height }),
    }
}

impl GridField {
    fn build(
        width: usize,
        height: usize,
        neighborhood: Neighborhood,
        allow_corner_cutting: bool,
        blocked: Vec<bool>,
    ) -> Result<GridField> {
        let count = cell_count(width, height)?;
        let cells = blocked
            .into_iter()
            .enumerate()
            .map(|(ix, is_obstacle)| Cell {
                position: Point::new((ix % width) as i32, (ix / width) as i32),
                is_obstacle,
                display_cost: None,
            })
            .collect();
        let mut grid = GridField {
            width,
            height,
            cells,
            neighborhood,
            allow_corner_cutting,
            components: UnionFind::new(count),
        };
        grid.generate_components();
        Ok(grid)
    }

    /// Builds a random grid. Cells are visited column by column and each one becomes an
    /// obstacle when a uniform draw from `0..100` falls below the configured percentage.
    pub fn generate(config: &GridConfig) -> Result<GridField> {
        if config.obstacle_percentage > 100 {
            return Err(Error::InvalidObstaclePercentage(config.obstacle_percentage));
        }
        let (width, height) = (config.width, config.height);
        let count = cell_count(width, height)?;
        info!(
            "Generating {}x{} grid with {}% obstacles",
            width, height, config.obstacle_percentage
        );
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let mut blocked = vec![false; count];
        for x in 0..width {
            for y in 0..height {
                blocked[y * width + x] = rng.gen_range(0..100u8) < config.obstacle_percentage;
            }
        }
        GridField::build(
            width,
            height,
            config.neighborhood,
            config.allow_corner_cutting,
            blocked,
        )
    }

    /// Builds a grid without obstacles.
    pub fn open(width: usize, height: usize, neighborhood: Neighborhood) -> Result<GridField> {
        let count = cell_count(width, height)?;
        GridField::build(width, height, neighborhood, true, vec![false; count])
    }

    /// Builds a grid where exactly the given points are obstacles.
    pub fn with_obstacles<I>(
        width: usize,
        height: usize,
        neighborhood: Neighborhood,
        obstacles: I,
    ) -> Result<GridField>
    where
        I: IntoIterator<Item = Point>,
    {
        let mut blocked = vec![false; cell_count(width, height)?];
        for point in obstacles {
            blocked[index_of(width, height, point)?] = true;
        }
        GridField::build(width, height, neighborhood, true, blocked)
    }

    /// Parses a text map where `#` and `@` are obstacles and any other character is free.
    /// The first non-empty line is row `y = 0`.
    pub fn parse_map(map: &str, neighborhood: Neighborhood) -> Result<GridField> {
        let rows: Vec<&str> = map
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();
        let width = rows.first().map(|row| row.chars().count()).unwrap_or(0);
        let height = rows.len();
        let mut blocked = Vec::with_capacity(cell_count(width, height)?);
        for (row, line) in rows.iter().enumerate() {
            let found = line.chars().count();
            if found != width {
                return Err(Error::RaggedMap {
                    row,
                    expected: width,
                    found,
                });
            }
            blocked.extend(line.chars().map(|c| c == '#' || c == '@'));
        }
        GridField::build(width, height, neighborhood, true, blocked)
    }

    /// Sets whether diagonal steps may pass between two blocked orthogonal cells and
    /// recomputes the components accordingly.
    pub fn with_corner_cutting(mut self, allow_corner_cutting: bool) -> GridField {
        self.allow_corner_cutting = allow_corner_cutting;
        self.generate_components();
        self
    }

    pub fn width(&self) -> usize {
        self.width
    }
    pub fn height(&self) -> usize {
        self.height
    }
    pub fn neighborhood(&self) -> Neighborhood {
        self.neighborhood
    }
    pub fn allows_corner_cutting(&self) -> bool {
        self.allow_corner_cutting
    }

    pub fn in_bounds(&self, point: Point) -> bool {
        index_of(self.width, self.height, point).is_ok()
    }

    fn index(&self, point: Point) -> Result<usize> {
        index_of(self.width, self.height, point)
    }

    pub fn cell_at(&self, x: i32, y: i32) -> Result<&Cell> {
        self.cell(Point::new(x, y))
    }

    pub fn cell(&self, point: Point) -> Result<&Cell> {
        Ok(&self.cells[self.index(point)?])
    }

    pub fn is_obstacle(&self, point: Point) -> Result<bool> {
        self.cell(point).map(Cell::is_obstacle)
    }

    /// Out-of-bounds points count as blocked.
    fn blocked(&self, point: Point) -> bool {
        self.index(point)
            .map(|ix| self.cells[ix].is_obstacle)
            .unwrap_or(true)
    }

    fn neighbor_points(&self, point: Point) -> SmallVec<[Point; 8]> {
        let offset = |&(dx, dy): &(i32, i32)| Point::new(point.x + dx, point.y + dy);
        let mut points: SmallVec<[Point; 8]> = ORTHOGONAL
            .iter()
            .map(offset)
            .filter(|p| self.in_bounds(*p))
            .collect();
        if self.neighborhood == Neighborhood::Eight {
            points.extend(DIAGONAL.iter().map(offset).filter(|p| {
                self.in_bounds(*p)
                    && (self.allow_corner_cutting
                        || (!self.blocked(Point::new(point.x, p.y))
                            && !self.blocked(Point::new(p.x, point.y))))
            }));
        }
        points
    }

    /// In-bounds cells adjacent to `point` under the grid's [Neighborhood], orthogonal
    /// cells first. Obstacles are included; callers decide whether to step on them.
    pub fn neighbors(&self, point: Point) -> Result<SmallVec<[Point; 8]>> {
        self.index(point)?;
        Ok(self.neighbor_points(point))
    }

    pub fn annotate(&mut self, point: Point, cost: i32) -> Result<()> {
        let ix = self.index(point)?;
        self.cells[ix].display_cost = Some(cost);
        Ok(())
    }

    pub fn clear_annotation(&mut self, point: Point) -> Result<()> {
        let ix = self.index(point)?;
        self.cells[ix].display_cost = None;
        Ok(())
    }

    /// All cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = &Cell> + '_ {
        self.cells.iter()
    }

    pub fn free_cells(&self) -> impl Iterator<Item = Point> + '_ {
        self.cells
            .iter()
            .filter(|cell| !cell.is_obstacle)
            .map(|cell| cell.position)
    }

    pub fn obstacle_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_obstacle).count()
    }

    /// Retrieves the component id a given [Point] belongs to.
    pub fn component(&self, point: Point) -> Result<usize> {
        Ok(self.components.find(self.index(point)?))
    }

    /// Checks if both points are free and on the same component.
    pub fn reachable(&self, start: Point, goal: Point) -> bool {
        match (self.index(start), self.index(goal)) {
            (Ok(start_ix), Ok(goal_ix)) => {
                !self.cells[start_ix].is_obstacle
                    && !self.cells[goal_ix].is_obstacle
                    && self.components.equiv(start_ix, goal_ix)
            }
            _ => false,
        }
    }

    /// Generates a new [UnionFind] structure and links up free neighbours to the same components.
    fn generate_components(&mut self) {
        self.components = UnionFind::new(self.cells.len());
        for ix in 0..self.cells.len() {
            let cell = self.cells[ix];
            if cell.is_obstacle {
                continue;
            }
            for neighbor in self.neighbor_points(cell.position) {
                if let Ok(neighbor_ix) = self.index(neighbor) {
                    if !self.cells[neighbor_ix].is_obstacle {
                        self.components.union(ix, neighbor_ix);
                    }
                }
            }
        }
    }
}

impl fmt::Display for GridField {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for row in self.cells.chunks(self.width) {
            let line: String = row
                .iter()
                .map(|cell| match (cell.is_obstacle, cell.display_cost) {
                    (true, _) => '#',
                    (false, Some(_)) => 'o',
                    (false, None) => '.',
                })
                .collect();
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}
