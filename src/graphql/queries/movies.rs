use super::prelude::*;

#[derive(Default)]
pub struct MovieQueries;

#[Object]
impl MovieQueries {
    /// Get every movie in the catalog, in storage order
    async fn movies(&self, ctx: &Context<'_>) -> Result<Option<Vec<Option<Movie>>>> {
        let catalog = ctx.data_unchecked::<Arc<CatalogService>>();

        let records = catalog.movies().await.map_err(store_error)?;

        Ok(Some(movie_list(records)))
    }

    /// Get a specific movie by ID
    async fn movie(&self, ctx: &Context<'_>, id: Option<ID>) -> Result<Option<Movie>> {
        let Some(id) = id else {
            return Ok(None);
        };
        let catalog = ctx.data_unchecked::<Arc<CatalogService>>();

        let record = catalog.movie(&id).await.map_err(store_error)?;

        Ok(record.map(movie_record_to_graphql))
    }
}
