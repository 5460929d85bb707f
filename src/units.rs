#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct Width(pub usize);
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct Height(pub usize);

#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct RowIndex(pub usize);
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct ColumnIndex(pub usize);

/// Period, in rows, of the lattice on which wall seeds may be planted.
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct RowSpacing(pub usize);
/// Period, in columns, of the lattice on which wall seeds may be planted.
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct ColumnSpacing(pub usize);
