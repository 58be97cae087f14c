/// Трейт для корня агрегата
///
/// Определяет идентификатор записи и метаданные коллекции, в которой
/// хранятся все экземпляры агрегата
pub trait AggregateRoot {
    // ============================================================================
    // Методы экземпляра (данные конкретной записи)
    // ============================================================================

    /// Получить ID записи (пустая строка, пока запись не сохранена)
    fn id(&self) -> &str;

    // ============================================================================
    // Метаданные класса агрегата (статические данные)
    // ============================================================================

    /// Индекс агрегата в системе (например, "a001")
    fn aggregate_index() -> &'static str;

    /// Имя коллекции в хранилище (например, "products")
    fn collection_name() -> &'static str;

    /// Имя элемента для сообщений (единственное число, например, "Product")
    fn element_name() -> &'static str;

    /// Имя списка для сообщений (множественное число, например, "Products")
    fn list_name() -> &'static str;

    // ============================================================================
    // Методы с реализацией по умолчанию
    // ============================================================================

    /// Полное имя агрегата для системы (например, "a001_products")
    fn full_name() -> String {
        format!("{}_{}", Self::aggregate_index(), Self::collection_name())
    }

    /// Сохранена ли запись (есть ли у неё идентификатор)
    fn is_persisted(&self) -> bool {
        !self.id().is_empty()
    }
}
