//! Grid storage: the current/next cell buffers, the render projection and
//! the coarse active-region map

use glam::IVec2;

use crate::simulation::{CHUNK_SIZE, Cell, CellFlags};

/// Two same-sized buffers: last frame's committed state and the frame being built
#[derive(Clone, Debug)]
pub struct DoubleBuffer<T> {
    current: Vec<T>,
    next: Vec<T>,
}

impl<T: Copy> DoubleBuffer<T> {
    pub fn new(len: usize, fill: T) -> Self {
        Self {
            current: vec![fill; len],
            next: vec![fill; len],
        }
    }

    #[inline]
    pub fn current(&self) -> &[T] {
        &self.current
    }

    #[inline]
    pub fn current_mut(&mut self) -> &mut [T] {
        &mut self.current
    }

    #[inline]
    pub fn next(&self) -> &[T] {
        &self.next
    }

    #[inline]
    pub fn next_mut(&mut self) -> &mut [T] {
        &mut self.next
    }

    /// Read the committed state while writing the next one
    #[inline]
    pub fn split(&mut self) -> (&[T], &mut [T]) {
        (&self.current, &mut self.next)
    }

    /// Start a frame from the committed state
    pub fn sync_next(&mut self) {
        self.next.copy_from_slice(&self.current);
    }

    /// Publish the next buffer as the committed state
    pub fn commit(&mut self) {
        std::mem::swap(&mut self.current, &mut self.next);
    }

    pub fn len(&self) -> usize {
        self.current.len()
    }

    pub fn is_empty(&self) -> bool {
        self.current.is_empty()
    }
}

/// Dirty tracking in CHUNK_SIZE x CHUNK_SIZE regions.
///
/// Every region is simulated every frame; the marks only record which
/// regions something happened in, for stats and future scheduling.
#[derive(Clone, Debug)]
pub struct ActiveRegions {
    chunks_x: usize,
    chunks_y: usize,
    touched: Vec<bool>,
}

impl ActiveRegions {
    pub fn new(width: usize, height: usize) -> Self {
        let chunks_x = width.div_ceil(CHUNK_SIZE);
        let chunks_y = height.div_ceil(CHUNK_SIZE);
        Self {
            chunks_x,
            chunks_y,
            touched: vec![true; chunks_x * chunks_y],
        }
    }

    pub fn chunks_x(&self) -> usize {
        self.chunks_x
    }

    pub fn chunks_y(&self) -> usize {
        self.chunks_y
    }

    /// Regions are never put to sleep
    #[inline]
    pub fn is_active(&self, chunk_x: usize, chunk_y: usize) -> bool {
        chunk_x < self.chunks_x && chunk_y < self.chunks_y
    }

    /// Record activity at a cell position
    #[inline]
    pub fn mark(&mut self, x: usize, y: usize) {
        self.mark_chunk(x / CHUNK_SIZE, y / CHUNK_SIZE);
    }

    #[inline]
    pub fn mark_chunk(&mut self, chunk_x: usize, chunk_y: usize) {
        if let Some(slot) = self.touched.get_mut(chunk_y * self.chunks_x + chunk_x) {
            *slot = true;
        }
    }

    pub fn is_touched(&self, chunk_x: usize, chunk_y: usize) -> bool {
        chunk_x < self.chunks_x
            && self
                .touched
                .get(chunk_y * self.chunks_x + chunk_x)
                .copied()
                .unwrap_or(false)
    }

    pub fn touched_count(&self) -> usize {
        self.touched.iter().filter(|t| **t).count()
    }

    pub fn clear_marks(&mut self) {
        self.touched.fill(false);
    }

    pub fn mark_all(&mut self) {
        self.touched.fill(true);
    }
}

/// Borrowed view of one frame in progress: read `current`, write `next`
pub struct FrameView<'a> {
    pub current: &'a [Cell],
    pub next: &'a mut [Cell],
    pub regions: &'a mut ActiveRegions,
    width: usize,
    height: usize,
}

impl FrameView<'_> {
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height
    }

    /// Row-major index of an in-bounds position
    #[inline]
    pub fn index(&self, x: usize, y: usize) -> usize {
        debug_assert!(x < self.width && y < self.height);
        y * self.width + x
    }

    #[inline]
    pub fn try_index(&self, x: i32, y: i32) -> Option<usize> {
        self.in_bounds(x, y).then(|| self.index(x as usize, y as usize))
    }

    #[inline]
    pub fn position(&self, index: usize) -> IVec2 {
        IVec2::new((index % self.width) as i32, (index / self.width) as i32)
    }

    #[inline]
    pub fn mark(&mut self, index: usize) {
        self.regions.mark(index % self.width, index / self.width);
    }
}

/// The simulated area: fixed size, two cell buffers and a render projection
#[derive(Clone, Debug)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: DoubleBuffer<Cell>,
    /// One material id per cell, refreshed from the committed buffer
    render: Vec<u8>,
    regions: ActiveRegions,
}

impl Grid {
    pub fn new(width: usize, height: usize) -> Self {
        let len = width * height;
        Self {
            width,
            height,
            cells: DoubleBuffer::new(len, Cell::EMPTY),
            render: vec![0; len],
            regions: ActiveRegions::new(width, height),
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    #[inline]
    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height
    }

    #[inline]
    pub fn try_index(&self, x: i32, y: i32) -> Option<usize> {
        self.in_bounds(x, y).then(|| y as usize * self.width + x as usize)
    }

    /// Committed cell at a position
    pub fn cell(&self, x: i32, y: i32) -> Option<&Cell> {
        self.try_index(x, y).map(|i| &self.cells.current()[i])
    }

    /// Cell in the frame being built
    pub fn next_cell(&self, x: i32, y: i32) -> Option<&Cell> {
        self.try_index(x, y).map(|i| &self.cells.next()[i])
    }

    pub fn cells(&self) -> &[Cell] {
        self.cells.current()
    }

    pub fn next_cells(&self) -> &[Cell] {
        self.cells.next()
    }

    /// Overwrite a committed cell. Out-of-bounds writes are ignored.
    pub fn set(&mut self, x: i32, y: i32, cell: Cell) -> bool {
        let Some(index) = self.try_index(x, y) else {
            return false;
        };
        self.cells.current_mut()[index] = cell;
        self.render[index] = cell.material.as_raw();
        self.regions.mark(x as usize, y as usize);
        true
    }

    /// Copy the committed state into the next buffer and drop last frame's flags
    pub fn begin_frame(&mut self) {
        self.cells.sync_next();
        for cell in self.cells.next_mut() {
            cell.flags = CellFlags::empty();
        }
        self.regions.clear_marks();
    }

    /// Borrow the buffers for the passes of one frame
    pub fn frame(&mut self) -> FrameView<'_> {
        let (current, next) = self.cells.split();
        FrameView {
            current,
            next,
            regions: &mut self.regions,
            width: self.width,
            height: self.height,
        }
    }

    /// Publish the frame and refresh the render projection
    pub fn commit(&mut self) {
        self.cells.commit();
        self.refresh_render();
    }

    pub fn refresh_render(&mut self) {
        for (byte, cell) in self.render.iter_mut().zip(self.cells.current()) {
            *byte = cell.material.as_raw();
        }
    }

    /// One material id per cell, row-major
    pub fn render_buffer(&self) -> &[u8] {
        &self.render
    }

    pub fn regions(&self) -> &ActiveRegions {
        &self.regions
    }

    /// Reset every cell to ambient air
    pub fn clear(&mut self) {
        self.cells.current_mut().fill(Cell::EMPTY);
        self.cells.next_mut().fill(Cell::EMPTY);
        self.render.fill(0);
        self.regions.mark_all();
    }
}
