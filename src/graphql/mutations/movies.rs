use super::prelude::*;

#[derive(Default)]
pub struct MovieMutations;

#[Object]
impl MovieMutations {
    /// Add a movie and return the updated catalog.
    ///
    /// Subscribers to `movieAdded` are notified once the movie is stored.
    async fn add_movie(
        &self,
        ctx: &Context<'_>,
        movie: Option<MovieInput>,
    ) -> Result<Option<Vec<Option<Movie>>>> {
        let identity = ctx.identity()?;
        let catalog = ctx.data_unchecked::<Arc<CatalogService>>();

        tracing::info!(
            user_id = %identity.user_id,
            movie_id = ?movie.as_ref().and_then(|m| m.id.as_deref()),
            title = ?movie.as_ref().and_then(|m| m.title.as_deref()),
            "User adding movie"
        );

        let records = catalog
            .add_movie(movie.map(CreateMovie::from))
            .await
            .map_err(store_error)?;

        Ok(Some(movie_list(records)))
    }
}
