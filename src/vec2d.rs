use std::fmt::{self, Debug, Display, Formatter};
use std::ops::{Index, IndexMut};

use crate::data::Pos;

/// Row-major 2D storage, `index = x + y * width`.
#[derive(Clone, PartialEq, Eq)]
pub(crate) struct Vec2d<T> {
    data: Vec<T>,
    width: usize,
    height: usize,
}

impl<T> Vec2d<T> {
    /// Pads shorter rows with `pad` so the result is rectangular.
    pub(crate) fn from_rows(rows: Vec<Vec<T>>, pad: T) -> Self
    where
        T: Clone,
    {
        let height = rows.len();
        let width = rows.iter().map(Vec::len).max().unwrap_or(0);
        let mut data = Vec::with_capacity(width * height);
        for row in rows {
            let len = row.len();
            data.extend(row);
            for _ in len..width {
                data.push(pad.clone());
            }
        }
        Vec2d {
            data,
            width,
            height,
        }
    }

    pub(crate) fn width(&self) -> usize {
        self.width
    }

    pub(crate) fn height(&self) -> usize {
        self.height
    }

    pub(crate) fn len(&self) -> usize {
        self.data.len()
    }

    pub(crate) fn in_bounds(&self, pos: Pos) -> bool {
        pos.x >= 0 && pos.y >= 0 && (pos.x as usize) < self.width && (pos.y as usize) < self.height
    }

    /// Panics when `pos` is out of bounds.
    pub(crate) fn index_of(&self, pos: Pos) -> usize {
        assert!(self.in_bounds(pos), "{:?} is out of bounds", pos);
        pos.x as usize + pos.y as usize * self.width
    }

    pub(crate) fn get(&self, pos: Pos) -> Option<&T> {
        if self.in_bounds(pos) {
            Some(&self.data[self.index_of(pos)])
        } else {
            None
        }
    }

    pub(crate) fn positions(&self) -> impl Iterator<Item = Pos> {
        let width = self.width;
        (0..self.height)
            .flat_map(move |y| (0..width).map(move |x| Pos::new(x as i32, y as i32)))
    }

    pub(crate) fn scratchpad<U: Default + Clone>(&self) -> Vec2d<U> {
        self.scratchpad_with_default(U::default())
    }

    pub(crate) fn scratchpad_with_default<U: Clone>(&self, default: U) -> Vec2d<U> {
        Vec2d {
            data: vec![default; self.data.len()],
            width: self.width,
            height: self.height,
        }
    }

    pub(crate) fn rows(&self) -> impl Iterator<Item = &[T]> {
        // chunks panics on 0
        self.data.chunks(self.width.max(1))
    }
}

impl<T: Display> Display for Vec2d<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for row in self.rows() {
            for cell in row {
                write!(f, "{}", cell)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl<T: Debug> Debug for Vec2d<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for row in self.rows() {
            for cell in row {
                write!(f, "{:?} ", cell)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl<T> Index<Pos> for Vec2d<T> {
    type Output = T;

    fn index(&self, pos: Pos) -> &Self::Output {
        let index = self.index_of(pos);
        &self.data[index]
    }
}

impl<T> IndexMut<Pos> for Vec2d<T> {
    fn index_mut(&mut self, pos: Pos) -> &mut Self::Output {
        let index = self.index_of(pos);
        &mut self.data[index]
    }
}
